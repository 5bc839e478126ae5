//! Contract error types for the entity store
//!
//! These errors are transport-agnostic; the dispatcher turns them into
//! envelope errors with a stable `kind`.

use std::fmt;

/// Entity store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Malformed or missing input, rejected before storage access
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Referenced entity is absent
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (app, user, product)
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// No operation matches the verb and path
    #[error("Route not found: {verb} {path}")]
    RouteNotFound { verb: String, path: String },

    /// Duplicate key on create
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Business rule violation
    #[error("Failed precondition: {reason}")]
    FailedPrecondition { reason: String },

    /// Unexpected storage failure; details are logged, not returned
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StoreError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::FailedPrecondition {
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable error classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RouteNotFound { .. } => ErrorKind::RouteNotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::FailedPrecondition { .. } => ErrorKind::FailedPrecondition,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Error classification carried in response envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    RouteNotFound,
    Conflict,
    FailedPrecondition,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "InvalidArgument",
            Self::NotFound => "NotFound",
            Self::RouteNotFound => "RouteNotFound",
            Self::Conflict => "Conflict",
            Self::FailedPrecondition => "FailedPrecondition",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
