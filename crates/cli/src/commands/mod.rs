//! CLI command implementations.

pub mod content;
pub mod resolve;
pub mod subscribers;
