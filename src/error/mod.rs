//! Error handling
//!
//! Defines error types and their mapping onto protocol replies.

pub mod handlers;
pub mod types;

pub use types::*;
