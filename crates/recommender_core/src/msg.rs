use std::fmt;

use crate::RequestId;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Operator edited the prompt text.
    PromptChanged(String),
    /// Operator edited the result-count field. Out-of-range values are clamped.
    ResultLimitChanged(i64),
    /// Operator asked for recommendations with the current input.
    Submitted,
    /// Engine resolution of a previously emitted request.
    ResponseReceived {
        request_id: RequestId,
        outcome: ResponseOutcome,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// A 2xx response whose body decoded as JSON.
    Payload(serde_json::Value),
    Failed(FailureReason),
}

/// Why a request did not produce a payload. Only used for diagnostics; the
/// operator sees one generic message for all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Network,
    Timeout,
    HttpStatus(u16),
    InvalidBody,
    Cancelled,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Network => write!(f, "network error"),
            FailureReason::Timeout => write!(f, "timeout"),
            FailureReason::HttpStatus(code) => write!(f, "http status {code}"),
            FailureReason::InvalidBody => write!(f, "response body is not valid json"),
            FailureReason::Cancelled => write!(f, "cancelled"),
        }
    }
}
