// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response-to-Resource mapping
//!
//! Converts a completed [`Response`] into a [`Resource`], and into the
//! single-shot stream every façade method returns: `Loading(true)`, exactly
//! one terminal state, `Loading(false)`. Nothing escapes this boundary as an
//! error; every fault becomes a `Failure`.

use async_stream::stream;
use futures::Stream;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::http::Response;
use crate::model::Resource;

/// Prefix for failures caused by the pipeline itself rather than the server.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Erro inesperado";

/// Error message for a failed response.
///
/// Precedence: the raw error-body content when non-blank, otherwise the
/// response's reason phrase (which the exception stage may have normalized).
pub fn error_message(response: &Response) -> String {
    let body = response.text_lossy();
    if body.trim().is_empty() {
        response.reason().to_string()
    } else {
        body
    }
}

/// Map a completed response into a terminal [`Resource`].
///
/// Success with a body deserializes it and applies `mapper`; an absent body
/// is still a success, with no payload. Deserialization faults surface as
/// `Failure` with the unexpected-error prefix, never as a panic or error.
pub fn as_resource<R, O, F>(response: &Response, mapper: F) -> Resource<O>
where
    R: DeserializeOwned,
    F: FnOnce(R) -> O,
{
    as_resource_with(response, |_headers, body| mapper(body))
}

/// Headers-aware variant of [`as_resource`], for payloads whose mapping
/// needs response metadata (pagination cursors, deprecation notices).
pub fn as_resource_with<R, O, F>(response: &Response, mapper: F) -> Resource<O>
where
    R: DeserializeOwned,
    F: FnOnce(&HeaderMap, R) -> O,
{
    if !response.is_success() {
        return Resource::Failure(error_message(response));
    }

    if response.body.is_empty() {
        return Resource::Success(None);
    }

    match response.json::<R>() {
        Ok(body) => Resource::Success(Some(mapper(&response.headers, body))),
        Err(e) => Resource::Failure(format!("{}: {}", UNEXPECTED_ERROR_MESSAGE, e)),
    }
}

/// Wrap the mapping in the standard loading-bracketed stream:
/// `Loading(true)`, one terminal state, `Loading(false)`.
///
/// The stream is single-shot and lazy. Dropping it (cancellation) stops
/// emission where it stands; it is never converted into a `Failure`.
pub fn as_resource_stream<R, O, F>(
    response: Response,
    mapper: F,
) -> impl Stream<Item = Resource<O>>
where
    R: DeserializeOwned,
    F: FnOnce(R) -> O,
{
    as_resource_stream_with(response, |_headers, body| mapper(body))
}

/// Headers-aware variant of [`as_resource_stream`].
pub fn as_resource_stream_with<R, O, F>(
    response: Response,
    mapper: F,
) -> impl Stream<Item = Resource<O>>
where
    R: DeserializeOwned,
    F: FnOnce(&HeaderMap, R) -> O,
{
    stream! {
        yield Resource::Loading(true);
        yield as_resource_with(&response, mapper);
        yield Resource::Loading(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::StreamExt;
    use reqwest::StatusCode;
    use serde::Deserialize;
    use url::Url;

    #[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
    struct Payload {
        value: String,
    }

    fn response(status: StatusCode, body: &str) -> Response {
        Response::new(
            status,
            HeaderMap::new(),
            Bytes::from(body.to_string()),
            Url::parse("https://api.example.com/ping").unwrap(),
            0,
        )
    }

    #[test]
    fn test_success_maps_body() {
        let resp = response(StatusCode::OK, r#"{"value":"ok"}"#);
        let resource = as_resource(&resp, |p: Payload| p.value);
        assert_eq!(resource, Resource::Success(Some("ok".to_string())));
    }

    #[test]
    fn test_empty_body_is_success_without_payload() {
        let resp = response(StatusCode::NO_CONTENT, "");
        let resource = as_resource(&resp, |p: Payload| p.value);
        assert_eq!(resource, Resource::Success(None));
    }

    #[test]
    fn test_malformed_body_is_unexpected_failure() {
        let resp = response(StatusCode::OK, "not json");
        let resource = as_resource(&resp, |p: Payload| p.value);
        match resource {
            Resource::Failure(message) => {
                assert!(message.starts_with(UNEXPECTED_ERROR_MESSAGE));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_error_body_takes_precedence() {
        let resp = response(StatusCode::INTERNAL_SERVER_ERROR, "server down");
        let resource = as_resource(&resp, |p: Payload| p.value);
        assert_eq!(resource, Resource::Failure("server down".to_string()));
    }

    #[test]
    fn test_blank_error_body_uses_reason() {
        let resp = response(StatusCode::NOT_FOUND, "  ");
        let resource = as_resource(&resp, |p: Payload| p.value);
        assert_eq!(resource, Resource::Failure("Not Found".to_string()));
    }

    #[test]
    fn test_headers_reach_the_mapper() {
        let mut resp = response(StatusCode::OK, r#"{"value":"ok"}"#);
        resp.headers.insert("x-request-id", "42".parse().unwrap());
        let resource = as_resource_with(&resp, |headers: &HeaderMap, p: Payload| {
            format!(
                "{}:{}",
                headers.get("x-request-id").unwrap().to_str().unwrap(),
                p.value
            )
        });
        assert_eq!(resource, Resource::Success(Some("42:ok".to_string())));
    }

    #[tokio::test]
    async fn test_stream_brackets_success_with_loading() {
        let resp = response(StatusCode::OK, r#"{"value":"ok"}"#);
        let emitted: Vec<_> = as_resource_stream(resp, |p: Payload| p.value)
            .collect()
            .await;
        assert_eq!(
            emitted,
            vec![
                Resource::Loading(true),
                Resource::Success(Some("ok".to_string())),
                Resource::Loading(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_brackets_failure_with_loading() {
        let resp = response(StatusCode::INTERNAL_SERVER_ERROR, "server down");
        let emitted: Vec<_> = as_resource_stream(resp, |p: Payload| p.value)
            .collect()
            .await;
        assert_eq!(
            emitted,
            vec![
                Resource::Loading(true),
                Resource::Failure("server down".to_string()),
                Resource::Loading(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_emits_exactly_one_terminal_state() {
        let resp = response(StatusCode::OK, r#"{"value":"ok"}"#);
        let emitted: Vec<_> = as_resource_stream(resp, |p: Payload| p.value)
            .collect()
            .await;
        let terminals = emitted.iter().filter(|r| r.is_terminal()).count();
        assert_eq!(terminals, 1);
    }
}
