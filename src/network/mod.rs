// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request pipeline: interceptors, tracing, response mapping, connectivity
//!
//! Cross-cutting concerns composed as independent stages around the
//! transport: authorization injection, error normalization, trace spans and
//! the response-to-resource mapper.

mod authorization;
mod exception;
pub mod mapper;
mod monitor;
pub mod tracer;

mod interceptor;

pub use authorization::{AuthorizationInterceptor, USER_AGENT_VALUE};
pub use exception::ExceptionInterceptor;
pub use interceptor::{InterceptAction, Interceptor, InterceptorChain};
pub use monitor::{NetworkMonitor, WatchNetworkMonitor};

/// Fallback message when a failure carries no usable detail.
pub const DEFAULT_ERROR_MESSAGE: &str = "Erro desconhecido";
