// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # b256-net - Typed Request Pipeline
//!
//! The network core of the B256 client: a layered request-execution
//! pipeline that turns a raw HTTP call into a typed, observable
//! three-state result stream.
//!
//! ## Features
//!
//! - Resource streams: every call emits Loading/Success/Failure with
//!   guaranteed bracketing and exactly one terminal state
//! - Interceptor chain: explicit ordered middleware for auth injection,
//!   session invalidation and error normalization
//! - Cookie persistence: host-keyed jar with a synchronous cache over an
//!   async store
//! - Traced execution: spans around every stub call, transport failures
//!   synthesized into response-shaped values
//! - Connectivity gating: offline calls short-circuit before dispatch
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use b256_net::http::{CookieManager, HttpClient};
//! use b256_net::network::{
//!     AuthorizationInterceptor, ExceptionInterceptor, InterceptorChain, WatchNetworkMonitor,
//! };
//! use b256_net::service::{ServerApi, Service, ServiceManager};
//! use b256_net::store::{MemoryCookieStore, MemorySessionStore};
//! use futures::StreamExt;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sessions = Arc::new(MemorySessionStore::new());
//!     let mut chain = InterceptorChain::new();
//!     chain.add(AuthorizationInterceptor::new(sessions));
//!     chain.add(ExceptionInterceptor);
//!
//!     let cookies = CookieManager::new(Arc::new(MemoryCookieStore::new()));
//!     let client = HttpClient::new(cookies, Arc::new(chain))?;
//!     let api = ServerApi::new(client, Url::parse("https://api.example.com/")?)?;
//!
//!     let monitor = Arc::new(WatchNetworkMonitor::with_initial(true));
//!     let service = ServiceManager::new(api, monitor);
//!
//!     let mut states = service.ping();
//!     while let Some(state) = states.next().await {
//!         println!("{:?}", state);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod model;
pub mod network;
pub mod service;
pub mod store;

// Re-exports for convenience

// Models
pub use model::{Pong, Resource, Session};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{Cookie, CookieManager, HttpClient, HttpClientConfig, Request, Response};

// Pipeline
pub use network::{
    AuthorizationInterceptor, ExceptionInterceptor, InterceptAction, Interceptor,
    InterceptorChain, NetworkMonitor, WatchNetworkMonitor,
};

// Stores
pub use store::{
    CookieStore, FileCookieStore, FileSessionStore, MemoryCookieStore, MemorySessionStore,
    SessionStore,
};

// Service façade
pub use service::{ServerApi, Service, ServiceManager};

/// b256-net version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
