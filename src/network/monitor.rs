// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Connectivity monitoring
//!
//! Tracks the set of live networks incrementally from platform callbacks and
//! publishes the boolean state through a watch channel: new observers get
//! the current value immediately and identical states coalesce.

use std::collections::HashSet;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::{FutureExt, StreamExt};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Observable connectivity state, consulted by the service layer before
/// dispatching a request.
pub trait NetworkMonitor: Send + Sync {
    /// Emits `true` while at least one network with internet capability is
    /// registered. The current value is emitted immediately to new
    /// observers; repeated identical states are coalesced.
    fn is_available(&self) -> BoxStream<'static, bool>;

    /// Logical negation of [`is_available`](Self::is_available), as a
    /// derived stream.
    fn is_unavailable(&self) -> BoxStream<'static, bool> {
        self.is_available().map(|connected| !connected).boxed()
    }

    /// One-shot gate read: the current unavailability, used before
    /// dispatching a request. A monitor whose stream has ended reads as
    /// unavailable.
    fn currently_unavailable(&self) -> BoxFuture<'static, bool> {
        let mut states = self.is_unavailable();
        async move { states.next().await.unwrap_or(true) }.boxed()
    }
}

/// Monitor fed by platform network-available / network-lost callbacks.
///
/// The state is recomputed incrementally from the set of registered network
/// handles, not re-queried from scratch on every callback.
pub struct WatchNetworkMonitor {
    networks: Mutex<HashSet<u64>>,
    tx: watch::Sender<bool>,
}

impl WatchNetworkMonitor {
    /// Create a monitor with no registered networks (offline).
    pub fn new() -> Self {
        Self::with_initial(false)
    }

    /// Create a monitor seeded with the platform's current connectivity,
    /// so observers do not wait for the first callback.
    pub fn with_initial(connected: bool) -> Self {
        let (tx, _rx) = watch::channel(connected);
        Self {
            networks: Mutex::new(HashSet::new()),
            tx,
        }
    }

    /// Platform callback: a network satisfying the internet capability
    /// became available.
    pub fn network_available(&self, id: u64) {
        let mut networks = self.networks.lock();
        networks.insert(id);
        self.publish(true);
    }

    /// Platform callback: a network was lost. Connectivity holds as long as
    /// any other registered network remains.
    pub fn network_lost(&self, id: u64) {
        let mut networks = self.networks.lock();
        networks.remove(&id);
        let connected = !networks.is_empty();
        self.publish(connected);
    }

    fn publish(&self, connected: bool) {
        // send_if_modified keeps observers quiet on repeated identical states
        self.tx.send_if_modified(|current| {
            if *current != connected {
                *current = connected;
                true
            } else {
                false
            }
        });
    }
}

impl Default for WatchNetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkMonitor for WatchNetworkMonitor {
    fn is_available(&self) -> BoxStream<'static, bool> {
        WatchStream::new(self.tx.subscribe()).boxed()
    }
}
