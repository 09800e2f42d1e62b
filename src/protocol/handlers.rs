//! File handler capabilities
//!
//! The protocol front end consumes four capabilities: content reads, content
//! writes, mutating commands and metadata queries. [`Handlers`] bundles one
//! implementation of each.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::HandlerError;
use crate::listing::DirectoryEntry;
use crate::protocol::request::Request;

pub type ContentReader = Box<dyn AsyncRead + Send + Unpin>;
pub type ContentWriter = Box<dyn AsyncWrite + Send + Unpin>;

#[async_trait]
pub trait FileReader: Send + Sync {
    async fn file_read(&self, request: &Request) -> Result<ContentReader, HandlerError>;
}

#[async_trait]
pub trait FileWriter: Send + Sync {
    async fn file_write(&self, request: &Request) -> Result<ContentWriter, HandlerError>;
}

/// Rename, remove, mkdir and friends
#[async_trait]
pub trait FileCmder: Send + Sync {
    async fn file_cmd(&self, request: &Request) -> Result<(), HandlerError>;
}

/// `List` and `Stat`
#[async_trait]
pub trait FileLister: Send + Sync {
    async fn file_info(&self, request: &Request) -> Result<Vec<DirectoryEntry>, HandlerError>;
}

#[derive(Clone)]
pub struct Handlers {
    pub reader: Arc<dyn FileReader>,
    pub writer: Arc<dyn FileWriter>,
    pub cmder: Arc<dyn FileCmder>,
    pub lister: Arc<dyn FileLister>,
}

impl Handlers {
    /// Use one value for all four capabilities.
    pub fn from_single<H>(handler: Arc<H>) -> Self
    where
        H: FileReader + FileWriter + FileCmder + FileLister + 'static,
    {
        Self {
            reader: handler.clone(),
            writer: handler.clone(),
            cmder: handler.clone(),
            lister: handler,
        }
    }
}
