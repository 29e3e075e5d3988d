//! Outcome of a forwarding attempt.

use std::fmt;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use serde_json::Value;

/// Why no usable answer came back from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// Discovery is disabled for this deployment; no network call was made.
    NotConfigured,
    /// No candidate answered the liveness probe.
    NoLiveBackend,
    /// Connection or transport failure.
    Unreachable(String),
    /// No complete response before the deadline.
    Timeout(Duration),
    /// A success status with a body that is not JSON.
    MalformedResponse(String),
}

impl UnavailableReason {
    /// True when there is no backend to talk to at all, as opposed to one
    /// that failed mid-request.
    pub fn is_absent(&self) -> bool {
        matches!(self, UnavailableReason::NotConfigured | UnavailableReason::NoLiveBackend)
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UnavailableReason::NotConfigured => "not_configured",
            UnavailableReason::NoLiveBackend => "no_live_backend",
            UnavailableReason::Unreachable(_) => "unreachable",
            UnavailableReason::Timeout(_) => "timeout",
            UnavailableReason::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NotConfigured => write!(f, "not configured"),
            UnavailableReason::NoLiveBackend => write!(f, "no backend answered the health probe"),
            UnavailableReason::Unreachable(detail) => write!(f, "backend unreachable: {}", detail),
            UnavailableReason::Timeout(after) => {
                write!(f, "backend did not answer within {} ms", after.as_millis())
            }
            UnavailableReason::MalformedResponse(detail) => {
                write!(f, "backend returned invalid JSON: {}", detail)
            }
        }
    }
}

/// Tagged result of one forward call. Every failure ends up here.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyResult {
    /// 2xx status and JSON body, already normalized.
    Success(StatusCode, Value),
    BackendUnavailable(UnavailableReason),
    /// Non-success status; content type and body kept verbatim.
    BackendError(StatusCode, Option<HeaderValue>, Bytes),
}

impl ProxyResult {
    pub fn outcome(&self) -> &'static str {
        match self {
            ProxyResult::Success(..) => "success",
            ProxyResult::BackendUnavailable(reason) => reason.kind(),
            ProxyResult::BackendError(..) => "backend_error",
        }
    }
}
