// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authorization stage: bearer token injection and session invalidation

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::watch;

use crate::http::{headers, Request, Response};
use crate::model::Session;
use crate::store::SessionStore;

use super::interceptor::{InterceptAction, Interceptor};

/// Fixed User-Agent sent with every request. Bot-filtering proxies (AWS WAF)
/// drop requests without a browser-shaped agent string.
pub const USER_AGENT_VALUE: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.6 Safari/605.1.15";

/// Injects the bearer credential and User-Agent headers, and invalidates the
/// stored session when the server answers 401 Unauthorized.
///
/// The token read is synchronous: the interceptor holds a watch receiver the
/// store keeps warm, so the request path never waits on storage I/O. The 401
/// cleanup is fire-and-forget and does not delay the response reaching the
/// caller. A 401 from the login endpoint itself is not a stale session and
/// leaves the store untouched.
pub struct AuthorizationInterceptor {
    sessions: watch::Receiver<Option<Session>>,
    store: Arc<dyn SessionStore>,
}

impl AuthorizationInterceptor {
    /// Create the stage, subscribing to the store's session channel.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            sessions: store.session(),
            store,
        }
    }

    /// Current token, empty when no session is active.
    fn token(&self) -> String {
        self.sessions
            .borrow()
            .as_ref()
            .map(|session| session.token.clone())
            .unwrap_or_default()
    }

    fn is_login(request: &Request) -> bool {
        request.url.path().contains("login")
    }
}

#[async_trait]
impl Interceptor for AuthorizationInterceptor {
    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        request.set_header(headers::AUTHORIZATION, format!("Bearer {}", self.token()));
        request.set_header(headers::USER_AGENT, USER_AGENT_VALUE);
        InterceptAction::Continue
    }

    async fn after_response(&self, request: &Request, response: &mut Response) {
        if response.status == StatusCode::UNAUTHORIZED && !Self::is_login(request) {
            let store = self.store.clone();
            tokio::spawn(async move {
                if let Err(e) = store.clean().await {
                    tracing::warn!(error = %e, "failed to clear session after 401");
                }
            });
        }
    }

    /// Run early so every later stage observes the authenticated request.
    fn priority(&self) -> i32 {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::store::MemorySessionStore;
    use bytes::Bytes;
    use reqwest::header::HeaderMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use url::Url;

    struct CountingStore {
        inner: MemorySessionStore,
        cleans: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: MemorySessionStore::with_session(Session::new("tok")),
                cleans: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SessionStore for CountingStore {
        fn session(&self) -> watch::Receiver<Option<Session>> {
            self.inner.session()
        }

        async fn set_session(&self, session: Session) -> Result<()> {
            self.inner.set_session(session).await
        }

        async fn clean(&self) -> Result<()> {
            self.cleans.fetch_add(1, Ordering::SeqCst);
            self.inner.clean().await
        }
    }

    fn response(status: StatusCode, path: &str) -> Response {
        Response::new(
            status,
            HeaderMap::new(),
            Bytes::new(),
            Url::parse(&format!("https://api.example.com{}", path)).unwrap(),
            0,
        )
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_injects_bearer_and_user_agent() {
        let store = Arc::new(MemorySessionStore::with_session(Session::new("abc123")));
        let stage = AuthorizationInterceptor::new(store);

        let mut request = Request::get("https://api.example.com/client/v4/ping").unwrap();
        let action = stage.before_request(&mut request).await;
        assert!(matches!(action, InterceptAction::Continue));
        assert_eq!(
            request.headers.get("authorization").map(|v| v.to_str().unwrap()),
            Some("Bearer abc123")
        );
        assert_eq!(
            request.headers.get("user-agent").map(|v| v.to_str().unwrap()),
            Some(USER_AGENT_VALUE)
        );
    }

    #[tokio::test]
    async fn test_empty_token_without_session() {
        let store = Arc::new(MemorySessionStore::new());
        let stage = AuthorizationInterceptor::new(store);

        let mut request = Request::get("https://api.example.com/ping").unwrap();
        stage.before_request(&mut request).await;
        assert_eq!(
            request.headers.get("authorization").map(|v| v.to_str().unwrap()),
            Some("Bearer ")
        );
    }

    #[tokio::test]
    async fn test_token_follows_store_updates() {
        let store = Arc::new(MemorySessionStore::new());
        let stage = AuthorizationInterceptor::new(store.clone());
        store.set_session(Session::new("fresh")).await.unwrap();

        let mut request = Request::get("https://api.example.com/ping").unwrap();
        stage.before_request(&mut request).await;
        assert_eq!(
            request.headers.get("authorization").map(|v| v.to_str().unwrap()),
            Some("Bearer fresh")
        );
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_once() {
        let store = Arc::new(CountingStore::new());
        let stage = AuthorizationInterceptor::new(store.clone());

        let request = Request::get("https://api.example.com/client/v4/ping").unwrap();
        let mut resp = response(StatusCode::UNAUTHORIZED, "/client/v4/ping");
        stage.after_response(&request, &mut resp).await;

        settle().await;
        assert_eq!(store.cleans.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_login_path_keeps_session() {
        let store = Arc::new(CountingStore::new());
        let stage = AuthorizationInterceptor::new(store.clone());

        let request = Request::get("https://api.example.com/client/v4/login").unwrap();
        let mut resp = response(StatusCode::UNAUTHORIZED, "/client/v4/login");
        stage.after_response(&request, &mut resp).await;

        settle().await;
        assert_eq!(store.cleans.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_keeps_session() {
        let store = Arc::new(CountingStore::new());
        let stage = AuthorizationInterceptor::new(store.clone());

        let request = Request::get("https://api.example.com/client/v4/ping").unwrap();
        let mut resp = response(StatusCode::OK, "/client/v4/ping");
        stage.after_response(&request, &mut resp).await;

        settle().await;
        assert_eq!(store.cleans.load(Ordering::SeqCst), 0);
    }
}
