// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Typed service façade
//!
//! The single entry point exposed to use cases: one method per remote
//! operation, each returning a resource stream. Nothing escapes a façade
//! method as an error; every failure path terminates in a
//! `Resource::Failure` emission.

mod api;

pub use api::{PongResponse, ServerApi};

use std::sync::Arc;

use async_stream::stream;
use futures::stream::BoxStream;
use futures::StreamExt;

use crate::model::{Pong, Resource};
use crate::network::{mapper, tracer, NetworkMonitor};

/// Failure message emitted when the connectivity gate rejects a dispatch.
pub const NO_CONNECTION_MESSAGE: &str = "Sem conexão com a internet";

/// Remote operations exposed to the use-case layer.
pub trait Service: Send + Sync {
    /// Ping the server.
    ///
    /// Online, the stream is `[Loading(true), Success | Failure,
    /// Loading(false)]`. Offline, the call is never dispatched and the
    /// stream is a single `Failure` with no loading bracket.
    fn ping(&self) -> BoxStream<'static, Resource<Pong>>;
}

/// Production [`Service`] backed by the [`ServerApi`] stub and gated on
/// connectivity.
pub struct ServiceManager {
    api: Arc<ServerApi>,
    monitor: Arc<dyn NetworkMonitor>,
}

impl ServiceManager {
    /// Create the façade.
    pub fn new(api: ServerApi, monitor: Arc<dyn NetworkMonitor>) -> Self {
        Self {
            api: Arc::new(api),
            monitor,
        }
    }
}

impl Service for ServiceManager {
    fn ping(&self) -> BoxStream<'static, Resource<Pong>> {
        let api = self.api.clone();
        let monitor = self.monitor.clone();

        stream! {
            // Gate before any emission: an offline call is never dispatched
            // and skips the loading bracket entirely.
            if monitor.currently_unavailable().await {
                yield Resource::Failure(NO_CONNECTION_MESSAGE.to_string());
                return;
            }

            let response =
                tracer::traced("ServerApi", api.ping_url().clone(), api.ping()).await;

            let mapped = mapper::as_resource_stream::<PongResponse, Pong, _>(response, Pong::from);
            for await resource in mapped {
                yield resource;
            }
        }
        .boxed()
    }
}
