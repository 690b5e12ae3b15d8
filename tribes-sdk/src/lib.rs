#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod agent;
mod error;
pub mod ui;

pub use crate::agent::TribesAgent;
pub use crate::error::{Error, Result};
pub use tribes_api as api;
pub use tribes_common as common;
