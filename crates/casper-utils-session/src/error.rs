//! Error types for call sessions.

use casper_utils_core::UtilityError;
use thiserror::Error;

use crate::session::SessionState;

/// Errors a call session reports to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Construction or execution of the computation failed.
    #[error(transparent)]
    Failed(#[from] UtilityError),

    /// Execution returned normally but left a non-empty last error.
    #[error("{kind}: {message}")]
    Reported { kind: &'static str, message: String },

    /// The computation panicked.
    #[error("computation panicked: {0}")]
    Panicked(String),

    /// The session already reached a terminal state.
    #[error("call session is finished ({state:?})")]
    Finished { state: SessionState },
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
