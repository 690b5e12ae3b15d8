#![doc = include_str!("../README.md")]
pub mod agent;
pub mod client;
pub mod tribe;
pub mod types;
pub use tribes_http;
