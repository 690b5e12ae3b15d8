use super::document::{Document, NodeId};
use super::{parse_attr, AlertLevel, ClickOutcome, Context, Notifier, DISABLED};
use crate::agent::TribesAgent;
use crate::error::Result;
use std::sync::Arc;
use tribes_api::tribe::join;
use tribes_api::tribes_http::ApiClient;
use tribes_api::types::TribeId;

const ATTRIBUTE: &str = "data-jointribe";
const MEMBER: &str = "member";
const HIDDEN: &str = "hidden";
const FOLLOWER_COUNT: &str = "follower_count";
const LOGIN_REQUIRED: &str = "Please login first.";
const FOLLOW_LABEL: &str = r#"Follow <i class="fas fa-plus"></i>"#;
const UNFOLLOW_LABEL: &str = r#"Unfollow <i class="fas fa-minus"></i>"#;

/// Handles the follow/unfollow controls (`data-jointribe="<tribe>"`).
pub struct JoinTribe<T>
where
    T: ApiClient + Send + Sync,
{
    agent: Arc<TribesAgent<T>>,
    context: Context,
    notifier: Arc<dyn Notifier + Send + Sync>,
}

impl<T> JoinTribe<T>
where
    T: ApiClient + Send + Sync,
{
    pub fn new(
        agent: Arc<TribesAgent<T>>,
        context: Context,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self { agent, context, notifier }
    }
    /// The controls of `document` this handler answers clicks for.
    pub fn bind(&self, document: &Document) -> Vec<NodeId> {
        document.query_attr(ATTRIBUTE)
    }
    /// Toggle the membership of the current user in the control's tribe, then
    /// update the control label and the follower counter.
    pub async fn click(&self, document: &Document, control: NodeId) -> Result<ClickOutcome> {
        if document.has_attr(control, DISABLED)? {
            return Ok(ClickOutcome::Ignored);
        }
        let output = match self.send(document, control).await? {
            Ok(output) => output,
            Err(outcome) => return Ok(outcome),
        };
        document.set_attr(control, MEMBER, output.is_member.to_string())?;
        document.set_html(control, if output.is_member { UNFOLLOW_LABEL } else { FOLLOW_LABEL })?;
        update_follower_count(document, if output.is_member { 1 } else { -1 })?;
        Ok(ClickOutcome::Joined { is_member: output.is_member })
    }
    /// Same request as [`click`](Self::click), for controls that only need
    /// hiding afterwards.
    pub async fn join_direct(&self, document: &Document, control: NodeId) -> Result<ClickOutcome> {
        let output = match self.send(document, control).await? {
            Ok(output) => output,
            Err(outcome) => return Ok(outcome),
        };
        document.set_attr(control, MEMBER, output.is_member.to_string())?;
        document.toggle_attr(control, HIDDEN, true)?;
        Ok(ClickOutcome::Joined { is_member: output.is_member })
    }
    // The control is re-enabled on both paths.
    async fn send(
        &self,
        document: &Document,
        control: NodeId,
    ) -> Result<core::result::Result<join::Output, ClickOutcome>> {
        if !self.context.is_authenticated() {
            self.notifier.alert(LOGIN_REQUIRED, AlertLevel::Error);
            return Ok(Err(ClickOutcome::LoginRequired));
        }
        let tribe = parse_attr::<TribeId>(document, control, ATTRIBUTE)?;
        document.toggle_attr(control, DISABLED, true)?;
        let result = self.agent.join(&tribe).await;
        document.toggle_attr(control, DISABLED, false)?;
        Ok(result.map_err(|err| {
            tracing::warn!(%tribe, error = %err, "failed to join tribe");
            ClickOutcome::Failed(err)
        }))
    }
}

fn update_follower_count(document: &Document, delta: i64) -> Result<()> {
    let Some(counter) = document.get_by_id(FOLLOWER_COUNT) else {
        return Ok(());
    };
    let spans = document.find_by_tag(counter, "span")?;
    if spans.is_empty() {
        return Ok(());
    }
    let mut text = String::new();
    for span in &spans {
        text.push_str(&document.text(*span)?);
    }
    let Ok(count) = text.trim().parse::<i64>() else {
        tracing::warn!(text = %text, "follower count is not a number");
        return Ok(());
    };
    let Some(count) = count.checked_add(delta) else {
        tracing::warn!(count, delta, "follower count out of range");
        return Ok(());
    };
    let count = count.to_string();
    for span in spans {
        document.set_text(span, &count)?;
    }
    Ok(())
}
