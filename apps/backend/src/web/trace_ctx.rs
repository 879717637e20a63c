//! Request-scoped trace id.
//!
//! `RequestTrace` scopes each request's handler future with
//! [`with_trace_id`]; anything running inside it (handlers, services,
//! `AppError` rendering) reads the id back with [`trace_id`].

use std::future::Future;

use tokio::task_local;

/// Placeholder when no request scope is active (CLI, background work, tests).
pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// The current request's trace id, if any.
pub fn current() -> Option<String> {
    TRACE_ID.try_with(Clone::clone).ok()
}

pub fn trace_id() -> String {
    current().unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
