// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSON-file-backed store implementations
//!
//! Single-file stores for embedders without a platform key-value service.
//! Writes are serialized through an internal lock; readers never touch the
//! file (the session is mirrored into a watch channel at load time).

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::model::Session;

use super::{CookieStore, SessionStore};

/// Session store persisted as a JSON file.
pub struct FileSessionStore {
    path: PathBuf,
    tx: watch::Sender<Option<Session>>,
    io: Mutex<()>,
}

impl FileSessionStore {
    /// Load the store, seeding the watch channel from disk.
    ///
    /// A missing or unreadable file yields an empty session rather than an
    /// error, matching the read path of the preference layer it replaces.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "corrupt session file, starting empty");
                None
            }),
            Err(_) => None,
        };
        let (tx, _rx) = watch::channel(initial);
        Self {
            path,
            tx,
            io: Mutex::new(()),
        }
    }

    async fn persist(&self, value: &Option<Session>) -> Result<()> {
        let _guard = self.io.lock().await;
        let bytes = serde_json::to_vec(value)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    fn session(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    async fn set_session(&self, session: Session) -> Result<()> {
        let value = Some(session);
        self.persist(&value).await?;
        self.tx.send_replace(value);
        Ok(())
    }

    async fn clean(&self) -> Result<()> {
        self.persist(&None).await?;
        self.tx.send_replace(None);
        Ok(())
    }
}

/// Cookie store persisted as a single JSON file mapping host to raw strings.
pub struct FileCookieStore {
    path: PathBuf,
    io: Mutex<()>,
}

impl FileCookieStore {
    /// Create a store backed by the given file. The file is created on the
    /// first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io: Mutex::new(()),
        }
    }

    async fn read_entries(&self) -> Result<HashMap<String, Vec<String>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CookieStore for FileCookieStore {
    async fn all(&self) -> Result<HashMap<String, Vec<String>>> {
        let _guard = self.io.lock().await;
        self.read_entries().await
    }

    async fn save(&self, host: &str, cookies: Vec<String>) -> Result<()> {
        let _guard = self.io.lock().await;
        let mut entries = self.read_entries().await.unwrap_or_default();
        entries.insert(host.to_string(), cookies);
        tokio::fs::write(&self.path, serde_json::to_vec(&entries)?).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.io.lock().await;
        tokio::fs::write(&self.path, b"{}").await?;
        Ok(())
    }
}
