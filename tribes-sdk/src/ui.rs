//! Click handlers for the tribe controls of a page.
//!
//! Each handler follows the same sequence: disable the control, send exactly
//! one request, then either patch the page with the response or re-enable
//! the control.
pub mod context;
pub mod document;
mod join;
mod leader;
mod notify;

pub use self::context::Context;
pub use self::join::JoinTribe;
pub use self::leader::TribeLeader;
pub use self::notify::{AlertLevel, Notifier, RecordingNotifier, TracingNotifier};
use self::document::{Document, NodeId};
use crate::error::{Error, Result};
use std::str::FromStr;

/// Boolean attribute set on a control while its request is in flight.
pub const DISABLED: &str = "disabled";

/// What a click on a control did.
#[derive(Debug)]
pub enum ClickOutcome {
    /// The control was disabled and swallowed the click.
    Ignored,
    /// Nobody is signed in; no request was sent.
    LoginRequired,
    /// The membership was toggled.
    Joined { is_member: bool },
    /// The member was promoted to tribe leader.
    Promoted,
    /// The request failed and the control was re-enabled.
    Failed(Error),
}

fn parse_attr<V>(document: &Document, control: NodeId, attribute: &'static str) -> Result<V>
where
    V: FromStr<Err = &'static str>,
{
    document
        .attr(control, attribute)?
        .ok_or(Error::MissingAttribute(attribute))?
        .parse()
        .map_err(|reason| Error::InvalidAttribute { attribute, reason })
}
