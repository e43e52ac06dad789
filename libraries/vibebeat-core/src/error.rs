/// Error taxonomy shared across VibeBeat crates
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a failure, independent of which crate raised it.
///
/// Every crate-level error type exposes `kind()` returning one of these so the
/// UI boundary can decide how to present a failure without matching on
/// concrete variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The request never produced a response (connection refused, reset, DNS)
    NetworkFailure,

    /// The request exceeded its time budget
    Timeout,

    /// The backend answered with a non-success status
    BackendFailure,

    /// A referenced song or playlist is absent from a fresh snapshot
    NotFound,

    /// A required field was empty or malformed
    ValidationFailure,

    /// Local key-value persistence failed
    Storage,
}

impl ErrorKind {
    /// Whether a request failing with this kind may be retried.
    ///
    /// Only transport-level failures qualify; a backend that answered with an
    /// error status is never retried.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::NetworkFailure | ErrorKind::Timeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::NetworkFailure => "network failure",
            ErrorKind::Timeout => "timeout",
            ErrorKind::BackendFailure => "backend failure",
            ErrorKind::NotFound => "not found",
            ErrorKind::ValidationFailure => "validation failure",
            ErrorKind::Storage => "storage failure",
        };
        f.write_str(label)
    }
}
