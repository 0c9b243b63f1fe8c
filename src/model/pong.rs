// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Server health-check payload

/// Result of a server ping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pong {
    /// Result reported by the server
    pub result: String,
    /// Whether the server considers the ping successful
    pub success: String,
}
