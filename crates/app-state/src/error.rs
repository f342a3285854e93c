//! Displayable error state
//!
//! Errors that reach a screen are turned into [`ErrorInfo`] values and stored
//! in state, never thrown into the UI tree. The kind decides how a screen
//! surfaces the error: inline text, a retry banner, or a blocking alert.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a user-visible error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Local input validation; surfaced inline on the producing screen only
    Validation,

    /// Backend/collaborator failure; retry-capable, stale data is preserved
    Fetch,

    /// A fetch exceeded its deadline
    TimedOut,

    /// A referenced entity does not exist; blocks and forces navigation back
    NotFound,

    /// Navigation contract violation; a defect, not a runtime condition
    NavigationContract,
}

/// A user-displayable error with its handling classification
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// How this error should be surfaced
    pub kind: ErrorKind,

    /// Message suitable for display
    pub message: String,
}

impl ErrorInfo {
    /// Create an error with an explicit kind
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Inline validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Retry-capable fetch failure
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fetch, message)
    }

    /// Deadline exceeded
    pub fn timed_out(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TimedOut, message)
    }

    /// Missing entity
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Whether a retry action makes sense for this error
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Fetch | ErrorKind::TimedOut)
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
