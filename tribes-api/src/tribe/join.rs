//! Definitions for the `POST /tribe/{tribe}/join/` endpoint.
//!
//! Toggles the membership of the current user in a tribe. The response tells
//! whether the user is a member after the toggle.
use crate::types::TribeId;

/// The request path for `tribe`.
pub fn path(tribe: &TribeId) -> String {
    format!("/tribe/{tribe}/join/")
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub is_member: bool,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "error", content = "message")]
pub enum Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, _f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {}
    }
}
