//! Client sessions
//!
//! Control connection lifecycle, per-connection login state and the registry
//! of active sessions.

pub mod handler;
pub mod registry;
pub mod state;

pub use handler::handle_client;
pub use registry::SessionRegistry;
pub use state::Client;
