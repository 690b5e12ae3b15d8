//! Definitions for the `POST /tribe/leader/` endpoint.
//!
//! Promotes a tribe member to leader. Only the status of the response matters.
use crate::types::MemberId;

pub const PATH: &str = "/tribe/leader/";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub member: MemberId,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "error", content = "message")]
pub enum Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, _f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {}
    }
}
