pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod listing;
pub mod protocol;
pub mod server;
pub mod storage;

pub use self::config::GatewayConfig;
pub use listing::{DirectoryEntry, DirectoryLister, ModTime};
pub use protocol::{BucketHandler, Handlers};
pub use server::Server;
