//! Protocol requests
//!
//! Every request carries a method tag and a target path. Rename also carries
//! the destination path.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    List,
    Stat,
    Get,
    Put,
    Rename,
    Remove,
    Mkdir,
    Rmdir,
    Other(String),
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::List => write!(f, "List"),
            Method::Stat => write!(f, "Stat"),
            Method::Get => write!(f, "Get"),
            Method::Put => write!(f, "Put"),
            Method::Rename => write!(f, "Rename"),
            Method::Remove => write!(f, "Remove"),
            Method::Mkdir => write!(f, "Mkdir"),
            Method::Rmdir => write!(f, "Rmdir"),
            Method::Other(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub filepath: String,
    pub target: Option<String>,
}

impl Request {
    pub fn new(method: Method, filepath: impl Into<String>) -> Self {
        Self {
            method,
            filepath: filepath.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}
