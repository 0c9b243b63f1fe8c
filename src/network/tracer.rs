// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Traced execution of API-stub calls
//!
//! Wraps each stub invocation in a named span and converts transport errors
//! into a synthesized HTTP 500 response, so downstream mapping always sees a
//! response-shaped value. Cancellation is future drop and propagates
//! untouched; there is no error branch that can swallow it.

use std::future::Future;

use reqwest::StatusCode;
use tracing::Instrument;
use url::Url;

use crate::error::Result;
use crate::http::Response;

use super::DEFAULT_ERROR_MESSAGE;

/// Execute an API call inside a span named after the API type.
///
/// On transport failure the error is logged and replaced by a plain-text
/// 500 response carrying the error's message as the body.
pub async fn traced<F>(api: &str, url: Url, call: F) -> Response
where
    F: Future<Output = Result<Response>>,
{
    let span = tracing::info_span!("network", api = api);
    match call.instrument(span).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(api = api, error = %e, "transport failure, synthesizing response");
            failure(url, e.to_string())
        }
    }
}

/// Standardized failure response for internal faults.
fn failure(url: Url, message: String) -> Response {
    let body = if message.is_empty() {
        DEFAULT_ERROR_MESSAGE.to_string()
    } else {
        message
    };
    Response::plain_text(StatusCode::INTERNAL_SERVER_ERROR, body, url)
}
