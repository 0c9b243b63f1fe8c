// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Domain models shared across the pipeline
//!
//! Pure value types: the three-state `Resource`, the authentication
//! `Session` and the `Pong` health-check payload.

mod pong;
mod resource;
mod session;

pub use pong::Pong;
pub use resource::Resource;
pub use session::Session;
