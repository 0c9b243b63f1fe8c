// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory store implementations
//!
//! Used in tests and by embedders that keep credentials for the lifetime of
//! the process only.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::watch;

use crate::error::Result;
use crate::model::Session;

use super::{CookieStore, SessionStore};

/// Session store backed by a watch channel, no persistence.
pub struct MemorySessionStore {
    tx: watch::Sender<Option<Session>>,
}

impl MemorySessionStore {
    /// Create an empty store (no active session).
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Create a store seeded with an active session.
    pub fn with_session(session: Session) -> Self {
        let (tx, _rx) = watch::channel(Some(session));
        Self { tx }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    fn session(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    async fn set_session(&self, session: Session) -> Result<()> {
        self.tx.send_replace(Some(session));
        Ok(())
    }

    async fn clean(&self) -> Result<()> {
        self.tx.send_replace(None);
        Ok(())
    }
}

/// Cookie store backed by a plain map, no persistence.
pub struct MemoryCookieStore {
    entries: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryCookieStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CookieStore for MemoryCookieStore {
    async fn all(&self) -> Result<HashMap<String, Vec<String>>> {
        Ok(self.entries.read().clone())
    }

    async fn save(&self, host: &str, cookies: Vec<String>) -> Result<()> {
        self.entries.write().insert(host.to_string(), cookies);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }
}
