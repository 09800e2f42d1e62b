//! Object store backends
//!
//! Defines the listing capability the gateway needs from a store and the
//! backends that provide it.

pub mod backend;
pub mod memory;
pub mod s3;

pub use backend::{ListingRequest, ObjectStore, StoreResponse, StoredObject};
pub use memory::MemoryStore;
pub use self::s3::S3Store;
