//! CLI command implementations.

pub mod details;
pub mod lines;
