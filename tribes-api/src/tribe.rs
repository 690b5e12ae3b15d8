//! Definitions for the `tribe` endpoints.
pub mod join;
pub mod leader;
