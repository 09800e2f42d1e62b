//! Protocol surface
//!
//! The file handler capabilities, the read-only bucket adapter that
//! implements them, and the control protocol command/reply formats.

pub mod adapter;
pub mod attrs;
pub mod commands;
pub mod dispatch;
pub mod handlers;
pub mod request;
pub mod responses;

pub use adapter::BucketHandler;
pub use attrs::FileAttributes;
pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use dispatch::handle_command;
pub use handlers::{FileCmder, FileLister, FileReader, FileWriter, Handlers};
pub use request::{Method, Request};
