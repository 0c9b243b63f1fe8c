// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response representation

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Result;

/// Completed HTTP response flowing back through the interceptor chain.
///
/// Interceptors may rewrite the body and the normalized `message` before the
/// response reaches the resource mapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Normalized message set by the exception stage, overriding the
    /// status's canonical reason phrase
    pub message: Option<String>,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            message: None,
            response_time_ms,
        }
    }

    /// Synthesize a plain-text response, used when the transport failed
    /// before producing one.
    pub fn plain_text(status: StatusCode, body: impl Into<String>, url: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            super::headers::CONTENT_TYPE,
            HeaderValue::from_static("text/plain"),
        );
        Self::new(status, headers, Bytes::from(body.into()), url, 0)
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if status is client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check if status is server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Reason phrase: the normalized message when one was set, otherwise the
    /// status's canonical reason.
    pub fn reason(&self) -> &str {
        match self.message.as_deref() {
            Some(message) => message,
            None => self.status.canonical_reason().unwrap_or(""),
        }
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get all values for a header
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(super::headers::CONTENT_TYPE)
    }

    /// Get Set-Cookie headers
    pub fn set_cookies(&self) -> Vec<&str> {
        self.header_all(super::headers::SET_COOKIE)
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_response_status() {
        let resp = Response::new(StatusCode::OK, HeaderMap::new(), Bytes::new(), url(), 100);
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
    }

    #[test]
    fn test_reason_defaults_to_canonical() {
        let resp = Response::new(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            Bytes::new(),
            url(),
            0,
        );
        assert_eq!(resp.reason(), "Not Found");
    }

    #[test]
    fn test_reason_prefers_normalized_message() {
        let mut resp = Response::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            HeaderMap::new(),
            Bytes::new(),
            url(),
            0,
        );
        resp.message = Some("server down".to_string());
        assert_eq!(resp.reason(), "server down");
    }

    #[test]
    fn test_plain_text_response() {
        let resp = Response::plain_text(StatusCode::INTERNAL_SERVER_ERROR, "boom", url());
        assert!(resp.is_server_error());
        assert_eq!(resp.text_lossy(), "boom");
        assert_eq!(resp.content_type(), Some("text/plain"));
    }
}
