//! Notifier error types

use std::io;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Errors that can occur while opening, writing to, or closing a notification socket
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{key} is not set, no supervisor to notify")]
    NotConfigured { key: &'static str },

    #[error("Failed to open notification socket {address}: {source}")]
    OpenFailed {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to send notification: {0}")]
    SendFailed(#[source] io::Error),

    #[error("Failed to close notification socket: {0}")]
    CloseFailed(#[source] io::Error),
}

impl NotifyError {
    /// Check if this error only means no supervisor was configured
    ///
    /// Callers running outside a supervisor should treat this as expected.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, NotifyError::NotConfigured { .. })
    }

    /// The underlying socket error, if any
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            NotifyError::NotConfigured { .. } => None,
            NotifyError::OpenFailed { source, .. } => Some(source),
            NotifyError::SendFailed(e) | NotifyError::CloseFailed(e) => Some(e),
        }
    }

    /// Classify the error the way the standard library would
    ///
    /// A missing configuration reports `NotFound`, same as a missing socket file.
    pub fn kind(&self) -> io::ErrorKind {
        match self.io_error() {
            Some(e) => e.kind(),
            None => io::ErrorKind::NotFound,
        }
    }
}

impl From<NotifyError> for io::Error {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::SendFailed(e) | NotifyError::CloseFailed(e) => e,
            other => io::Error::new(other.kind(), other),
        }
    }
}
