use super::document::{Document, NodeId};
use super::{parse_attr, ClickOutcome, DISABLED};
use crate::agent::TribesAgent;
use crate::error::Result;
use std::sync::Arc;
use tribes_api::tribes_http::ApiClient;
use tribes_api::types::MemberId;

const ATTRIBUTE: &str = "data-tribeleader";
const LABEL: &str = "Tribe Leader";
const LABEL_CLASSES: &str = "text-center text-uppercase font-weight-bold p-1 text-highlight-yellow";
const CARD: &str = "card";
const BADGE: &str = "badge-tribe_leader";
const HIDE: &str = "d-none";

/// Handles the "make leader" controls (`data-tribeleader="<member>"`).
pub struct TribeLeader<T>
where
    T: ApiClient + Send + Sync,
{
    agent: Arc<TribesAgent<T>>,
}

impl<T> TribeLeader<T>
where
    T: ApiClient + Send + Sync,
{
    pub fn new(agent: Arc<TribesAgent<T>>) -> Self {
        Self { agent }
    }
    pub fn bind(&self, document: &Document) -> Vec<NodeId> {
        document.query_attr(ATTRIBUTE)
    }
    /// Promote the control's member, then replace the control with a
    /// "Tribe Leader" label and reveal the leader badge of its card.
    pub async fn click(&self, document: &Document, control: NodeId) -> Result<ClickOutcome> {
        if document.has_attr(control, DISABLED)? {
            return Ok(ClickOutcome::Ignored);
        }
        let member = parse_attr::<MemberId>(document, control, ATTRIBUTE)?;
        document.toggle_attr(control, DISABLED, true)?;
        if let Err(err) = self.agent.promote_leader(member.clone()).await {
            document.toggle_attr(control, DISABLED, false)?;
            tracing::warn!(%member, error = %err, "failed to promote tribe leader");
            return Ok(ClickOutcome::Failed(err));
        }
        let label = document.create_element("span")?;
        document.add_class(label, LABEL_CLASSES)?;
        document.set_text(label, LABEL)?;
        document.insert_after(control, label)?;
        if let Some(card) = document.closest_by_class(control, CARD)? {
            for badge in document.find_by_class(card, BADGE)? {
                document.remove_class(badge, HIDE)?;
            }
        }
        document.remove(control)?;
        Ok(ClickOutcome::Promoted)
    }
}
