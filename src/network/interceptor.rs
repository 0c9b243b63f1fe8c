// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor trait and ordered chain
//!
//! Middleware pattern for the request pipeline: each stage observes or
//! mutates the outgoing request, then post-processes the returned response.
//! Ordering is explicit via priorities, so invariants like "authorization
//! runs before error normalization observes the response" hold by
//! construction rather than by registration order.

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::{Request, Response};

/// A middleware stage in the request pipeline.
///
/// # Example
///
/// ```rust,no_run
/// use b256_net::network::{Interceptor, InterceptAction};
/// use b256_net::http::Request;
/// use async_trait::async_trait;
///
/// struct TenantHeader {
///     tenant: String,
/// }
///
/// #[async_trait]
/// impl Interceptor for TenantHeader {
///     async fn before_request(&self, request: &mut Request) -> InterceptAction {
///         request.set_header("x-tenant", &self.tenant);
///         InterceptAction::Continue
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Called before the request is sent. May mutate the request, abort it,
    /// or answer it with a mock response.
    async fn before_request(&self, _request: &mut Request) -> InterceptAction {
        InterceptAction::Continue
    }

    /// Called after a response is received. Must never fail the call; stages
    /// that can error internally swallow and log.
    async fn after_response(&self, _request: &Request, _response: &mut Response) {}

    /// Priority - higher priority interceptors run first
    fn priority(&self) -> i32 {
        0
    }
}

/// Action to take after the before-request hook
#[derive(Debug, Clone)]
pub enum InterceptAction {
    /// Continue with the (possibly modified) request
    Continue,
    /// Abort the request with an error
    Abort(String),
    /// Return a mock response instead of making the actual request
    MockResponse(Response),
}

/// Explicit ordered list of interceptors.
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Default for InterceptorChain {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Add an interceptor, keeping the chain sorted by priority
    /// (highest first).
    pub fn add<I: Interceptor + 'static>(&mut self, interceptor: I) {
        self.interceptors.push(Arc::new(interceptor));
        self.interceptors.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Number of registered interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run the before-request hooks in priority order. The first
    /// non-`Continue` action short-circuits the rest of the chain.
    pub async fn before(&self, request: &mut Request) -> InterceptAction {
        for interceptor in &self.interceptors {
            match interceptor.before_request(request).await {
                InterceptAction::Continue => continue,
                action => return action,
            }
        }
        InterceptAction::Continue
    }

    /// Run the after-response hooks in the same priority order.
    pub async fn after(&self, request: &Request, response: &mut Response) {
        for interceptor in &self.interceptors {
            interceptor.after_response(request, response).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tagger {
        name: &'static str,
        priority: i32,
    }

    #[async_trait]
    impl Interceptor for Tagger {
        async fn before_request(&self, request: &mut Request) -> InterceptAction {
            let seen = request
                .headers
                .get("x-order")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            request.set_header("x-order", format!("{}{}", seen, self.name));
            InterceptAction::Continue
        }

        fn priority(&self) -> i32 {
            self.priority
        }
    }

    struct Blocker;

    #[async_trait]
    impl Interceptor for Blocker {
        async fn before_request(&self, _request: &mut Request) -> InterceptAction {
            InterceptAction::Abort("blocked".to_string())
        }
    }

    #[tokio::test]
    async fn test_priority_ordering() {
        let mut chain = InterceptorChain::new();
        chain.add(Tagger {
            name: "b",
            priority: 0,
        });
        chain.add(Tagger {
            name: "a",
            priority: 100,
        });

        let mut request = Request::get("https://example.com").unwrap();
        let action = chain.before(&mut request).await;
        assert!(matches!(action, InterceptAction::Continue));
        assert_eq!(
            request.headers.get("x-order").map(|v| v.to_str().unwrap()),
            Some("ab")
        );
    }

    #[tokio::test]
    async fn test_abort_short_circuits() {
        let mut chain = InterceptorChain::new();
        chain.add(Blocker);
        chain.add(Tagger {
            name: "x",
            priority: -1,
        });

        let mut request = Request::get("https://example.com").unwrap();
        let action = chain.before(&mut request).await;
        assert!(matches!(action, InterceptAction::Abort(reason) if reason == "blocked"));
        assert!(request.headers.get("x-order").is_none());
    }
}
