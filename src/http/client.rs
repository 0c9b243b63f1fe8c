// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client with interceptor chain and cookie jar

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::cookie::{Cookie, CookieManager};
use super::headers;
use super::request::Request;
use super::response::Response;
use crate::error::{Error, Result};
use crate::network::{InterceptAction, InterceptorChain};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Default timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Enable cookie handling
    pub handle_cookies: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            headers::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );

        Self {
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            default_headers,
            handle_cookies: true,
            proxy: None,
        }
    }
}

/// Transport orchestrator: runs each request through the interceptor chain
/// and the cookie jar around a reqwest client.
///
/// reqwest's own cookie store stays disabled; the jar is the persistent
/// [`CookieManager`], so cookies survive process restarts.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    cookies: CookieManager,
    interceptors: Arc<InterceptorChain>,
}

impl HttpClient {
    /// Create a client with default configuration.
    pub fn new(cookies: CookieManager, interceptors: Arc<InterceptorChain>) -> Result<Self> {
        Self::with_config(HttpClientConfig::default(), cookies, interceptors)
    }

    /// Create a client with custom configuration.
    pub fn with_config(
        config: HttpClientConfig,
        cookies: CookieManager,
        interceptors: Arc<InterceptorChain>,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            cookies,
            interceptors,
        })
    }

    /// Get the cookie jar
    pub fn cookie_jar(&self) -> &CookieManager {
        &self.cookies
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Execute a GET request
    pub async fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?).await
    }

    /// Execute a POST request
    pub async fn post(&self, url: impl AsRef<str>, body: impl Into<Bytes>) -> Result<Response> {
        self.execute(Request::post(url)?.body(body)).await
    }

    /// Execute a request through the full pipeline: before hooks, cookie
    /// replay, transport, cookie capture, after hooks.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let mut request = request;

        match self.interceptors.before(&mut request).await {
            InterceptAction::Continue => {}
            InterceptAction::Abort(reason) => return Err(Error::Aborted(reason)),
            InterceptAction::MockResponse(mut response) => {
                self.interceptors.after(&request, &mut response).await;
                return Ok(response);
            }
        }

        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if self.config.handle_cookies {
            let cookie_header = self
                .cookies
                .load_for_request(&request.url)
                .iter()
                .filter(|cookie| cookie.matches(&request.url))
                .map(Cookie::to_header_value)
                .collect::<Vec<_>>()
                .join("; ");
            if !cookie_header.is_empty() {
                builder = builder.header(headers::COOKIE, cookie_header);
            }
        }

        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let final_url = response.url().clone();
        let status = response.status();
        let response_headers = response.headers().clone();

        // A response that sets cookies replaces the host's entry wholesale
        if self.config.handle_cookies {
            let cookies: Vec<Cookie> = response_headers
                .get_all(headers::SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .filter_map(|header| Cookie::parse(header, &final_url))
                .collect();
            if !cookies.is_empty() {
                self.cookies.save_from_response(&final_url, cookies);
            }
        }

        let body = response.bytes().await?;

        let mut response = Response::new(status, response_headers, body, final_url, response_time);
        self.interceptors.after(&request, &mut response).await;

        Ok(response)
    }
}
