//! Session registry
//!
//! Tracks which peers currently hold a control session so the server can
//! enforce `max_clients`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Instant;

pub struct SessionRegistry {
    sessions: HashMap<SocketAddr, Instant>,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            max_sessions,
        }
    }

    /// Register `addr`; returns false when the registry is full.
    pub fn try_register(&mut self, addr: SocketAddr) -> bool {
        if self.sessions.len() >= self.max_sessions && !self.sessions.contains_key(&addr) {
            return false;
        }
        self.sessions.insert(addr, Instant::now());
        true
    }

    /// Remove `addr`, returning how long its session lasted.
    pub fn remove(&mut self, addr: &SocketAddr) -> Option<std::time::Duration> {
        self.sessions.remove(addr).map(|since| since.elapsed())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_sessions
    }
}
