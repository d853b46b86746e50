//! CLI command handlers.

pub mod auth;
pub mod generate;
pub mod keys;
pub mod status;
