// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Server API stub
//!
//! One method per remote operation, each returning the raw transport
//! response. Typed mapping happens in the service layer.

use reqwest::Method;
use serde::Deserialize;
use url::Url;

use crate::error::Result;
use crate::http::{HttpClient, Request, Response};
use crate::model::Pong;

pub(crate) const PING_PATH: &str = "client/v4/ping";

/// Wire model for the ping endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PongResponse {
    pub result: String,
    pub success: String,
}

impl From<PongResponse> for Pong {
    fn from(response: PongResponse) -> Self {
        Pong {
            result: response.result,
            success: response.success,
        }
    }
}

/// Typed stub over the server's remote operations.
pub struct ServerApi {
    client: HttpClient,
    ping_url: Url,
}

impl ServerApi {
    /// Create a stub rooted at the given base URL.
    pub fn new(client: HttpClient, base_url: Url) -> Result<Self> {
        Ok(Self {
            ping_url: base_url.join(PING_PATH)?,
            client,
        })
    }

    pub(crate) fn ping_url(&self) -> &Url {
        &self.ping_url
    }

    /// `GET client/v4/ping`
    pub async fn ping(&self) -> Result<Response> {
        self.client
            .execute(Request::from_url(Method::GET, self.ping_url.clone()))
            .await
    }
}
