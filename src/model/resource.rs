// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Three-state result type for observable network operations

/// Observable state of an asynchronous network operation.
///
/// A request routed through the standard pipeline emits exactly
/// `[Loading(true), Success | Failure, Loading(false)]`, in that order.
/// `Loading` is a progress marker and never follows the terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    /// Terminal, successful completion. The payload is absent when the
    /// server returned no body.
    Success(Option<T>),
    /// Terminal, unsuccessful completion with a human-readable message.
    Failure(String),
    /// Non-terminal progress marker: `true` at dispatch start, `false`
    /// at finish regardless of outcome.
    Loading(bool),
}

impl<T> Resource<T> {
    /// Map the success payload, leaving failure and loading states intact.
    pub fn map<R>(self, transform: impl FnOnce(T) -> R) -> Resource<R> {
        match self {
            Resource::Success(data) => Resource::Success(data.map(transform)),
            Resource::Failure(message) => Resource::Failure(message),
            Resource::Loading(is_loading) => Resource::Loading(is_loading),
        }
    }

    /// Check if this is a terminal state (success or failure).
    pub fn is_terminal(&self) -> bool {
        match self {
            Resource::Success(_) => true,
            Resource::Failure(_) => true,
            Resource::Loading(_) => false,
        }
    }

    /// Check if this is a success state.
    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    /// Check if this is a failure state.
    pub fn is_failure(&self) -> bool {
        matches!(self, Resource::Failure(_))
    }

    /// Get the success payload, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => data.as_ref(),
            Resource::Failure(_) => None,
            Resource::Loading(_) => None,
        }
    }

    /// Get the failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Resource::Failure(message) => Some(message),
            Resource::Success(_) => None,
            Resource::Loading(_) => None,
        }
    }
}
