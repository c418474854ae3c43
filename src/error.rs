//! Error types for a removal session.
//!
//! Every failure lands the session in the error screen; `user_message`
//! is what the screen shows, `Display` is what goes to the log.

use thiserror::Error;

use crate::constants::{GENERIC_FAILURE, MAX_FILE_SIZE};

/// Rejections raised by the file validator before anything touches the network
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("not an image: declared type is {mime:?}")]
    NotAnImage { mime: String },

    #[error("too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::NotAnImage { .. } => "Please select a valid image file".to_string(),
            ValidationError::TooLarge { .. } => format!(
                "File size must be less than {}MB",
                MAX_FILE_SIZE / (1024 * 1024)
            ),
        }
    }
}

/// Failures of a call to the removal service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No response at all: refused, unresolvable, dropped mid-flight
    #[error("service at {url} is unreachable: {reason}")]
    Unreachable { url: String, reason: String },

    /// Non-success status. `detail` is the service-provided message, if any.
    #[error("service rejected the request with status {status}")]
    RequestRejected { status: u16, detail: Option<String> },

    /// A response arrived but its body could not be used
    #[error("invalid response from service: {reason}")]
    InvalidResponse { reason: String },
}

impl ServiceError {
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Unreachable { url, .. } => format!(
                "Cannot connect to the backend server at {}. Please make sure it is running.",
                url
            ),
            ServiceError::RequestRejected { detail: Some(detail), .. } => detail.clone(),
            ServiceError::RequestRejected { detail: None, .. } => GENERIC_FAILURE.to_string(),
            ServiceError::InvalidResponse { .. } => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Coarse classification used by the UI and the tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    LocalRead,
    ServiceUnreachable,
    RequestRejected,
    InvalidResponse,
}

/// Anything that ends a submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not read {name}: {reason}")]
    LocalRead { name: String, reason: String },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl SessionError {
    pub fn local_read(name: impl Into<String>, reason: impl ToString) -> Self {
        SessionError::LocalRead {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Validation(_) => ErrorKind::Validation,
            SessionError::LocalRead { .. } => ErrorKind::LocalRead,
            SessionError::Service(ServiceError::Unreachable { .. }) => ErrorKind::ServiceUnreachable,
            SessionError::Service(ServiceError::RequestRejected { .. }) => ErrorKind::RequestRejected,
            SessionError::Service(ServiceError::InvalidResponse { .. }) => ErrorKind::InvalidResponse,
        }
    }

    /// Text shown on the error screen
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Validation(e) => e.user_message(),
            SessionError::LocalRead { .. } => {
                "Could not read the selected file. Please choose another image.".to_string()
            }
            SessionError::Service(e) => e.user_message(),
        }
    }
}
