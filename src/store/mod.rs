// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Persistence collaborators for sessions and cookies
//!
//! The pipeline never touches storage directly. It reads the session from a
//! synchronously-readable watch channel kept warm by the store, and hands
//! cookie lists to a [`CookieStore`] for best-effort persistence.

mod file;
mod memory;

pub use file::{FileCookieStore, FileSessionStore};
pub use memory::{MemoryCookieStore, MemorySessionStore};

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Result;
use crate::model::Session;

/// Persistent session store.
///
/// Read-many/write-rarely: every outgoing request reads the current session,
/// writes happen on login and on forced logout (401).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Observe the current session. The receiver always holds the latest
    /// value, so `borrow()` is a non-blocking read suitable for the
    /// authorization stage.
    fn session(&self) -> watch::Receiver<Option<Session>>;

    /// Replace the current session.
    async fn set_session(&self, session: Session) -> Result<()>;

    /// Clear the current session.
    async fn clean(&self) -> Result<()>;
}

/// Persistent cookie store, keyed by host.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// All persisted cookies, host to raw cookie strings.
    async fn all(&self) -> Result<HashMap<String, Vec<String>>>;

    /// Replace the persisted list for a host.
    async fn save(&self, host: &str, cookies: Vec<String>) -> Result<()>;

    /// Drop all persisted cookies.
    async fn clear(&self) -> Result<()>;
}
