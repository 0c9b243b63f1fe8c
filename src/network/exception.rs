// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error normalization stage
//!
//! Servers answer failures with a JSON object carrying a `message` field.
//! This stage rewrites non-success responses so the human-readable message
//! is what reaches the resource mapper, instead of the raw JSON envelope.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderValue;
use serde_json::Value;

use crate::http::{headers, Request, Response};

use super::interceptor::Interceptor;
use super::DEFAULT_ERROR_MESSAGE;

/// Normalizes non-2xx responses into plain-text error messages.
///
/// Successful responses pass through untouched. For failures whose body is a
/// JSON object, the `message` field (or [`DEFAULT_ERROR_MESSAGE`] when the
/// object has none) replaces the body and the reason phrase, preserving the
/// status code. Bodies that are not JSON objects are left as-is so the raw
/// error text keeps its precedence in the mapper. Normalization itself never
/// fails the call.
pub struct ExceptionInterceptor;

#[async_trait]
impl Interceptor for ExceptionInterceptor {
    async fn after_response(&self, _request: &Request, response: &mut Response) {
        if response.is_success() {
            return;
        }

        let message = match serde_json::from_slice::<Value>(&response.body) {
            Ok(Value::Object(fields)) => fields
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_ERROR_MESSAGE)
                .to_string(),
            _ => return,
        };

        tracing::debug!(
            status = response.status_code(),
            url = %response.url,
            message = %message,
            "normalized error response"
        );

        response.body = Bytes::from(message.clone());
        response.message = Some(message);
        response
            .headers
            .insert(headers::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use url::Url;

    fn response(status: StatusCode, body: &str) -> Response {
        Response::new(
            status,
            HeaderMap::new(),
            Bytes::from(body.to_string()),
            Url::parse("https://api.example.com/ping").unwrap(),
            0,
        )
    }

    fn request() -> Request {
        Request::get("https://api.example.com/ping").unwrap()
    }

    #[tokio::test]
    async fn test_extracts_json_message() {
        let mut resp = response(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message":"server down"}"#,
        );
        ExceptionInterceptor.after_response(&request(), &mut resp).await;

        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.text_lossy(), "server down");
        assert_eq!(resp.reason(), "server down");
    }

    #[tokio::test]
    async fn test_object_without_message_gets_default() {
        let mut resp = response(StatusCode::BAD_GATEWAY, r#"{"code":42}"#);
        ExceptionInterceptor.after_response(&request(), &mut resp).await;

        assert_eq!(resp.text_lossy(), DEFAULT_ERROR_MESSAGE);
        assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_non_json_body_untouched() {
        let mut resp = response(StatusCode::SERVICE_UNAVAILABLE, "upstream exploded");
        ExceptionInterceptor.after_response(&request(), &mut resp).await;

        assert_eq!(resp.text_lossy(), "upstream exploded");
        assert!(resp.message.is_none());
    }

    #[tokio::test]
    async fn test_success_untouched() {
        let mut resp = response(StatusCode::OK, r#"{"message":"not an error"}"#);
        ExceptionInterceptor.after_response(&request(), &mut resp).await;

        assert_eq!(resp.text_lossy(), r#"{"message":"not an error"}"#);
        assert!(resp.message.is_none());
    }
}
