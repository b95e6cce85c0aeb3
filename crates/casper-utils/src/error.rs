//! The single terminal error surfaced to the host.

use casper_utils_core::UtilityError;
use casper_utils_session::SessionError;
use thiserror::Error;

/// A failed call, as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Argument validation or a computation failed.
    #[error(transparent)]
    Utility(#[from] UtilityError),

    /// The call session rejected or aborted the call.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl BridgeError {
    /// The underlying computation error, if there is one.
    pub fn utility(&self) -> Option<&UtilityError> {
        match self {
            BridgeError::Utility(e) | BridgeError::Session(SessionError::Failed(e)) => Some(e),
            BridgeError::Session(_) => None,
        }
    }
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
