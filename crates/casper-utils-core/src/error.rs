//! Error types for casper-utils computations.

use thiserror::Error;

/// Errors a computation can report.
///
/// Every failure inside `execute` is normalized to one of these variants and
/// surfaces as a single fatal error for the whole call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UtilityError {
    /// Bad or missing caller input.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Key material could not be read or parsed.
    #[error("key material error: {0}")]
    KeyMaterial(String),

    /// A signing or encryption step failed.
    #[error("crypto operation failed: {0}")]
    CryptoOperation(String),

    /// Output violates a domain invariant.
    #[error("encoding invariant violated: {0}")]
    EncodingInvariant(String),

    /// Malformed structured input.
    #[error("format error: {0}")]
    Format(String),
}

/// Discriminant of [`UtilityError`], for matching without the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Argument,
    KeyMaterial,
    CryptoOperation,
    EncodingInvariant,
    Format,
}

impl UtilityError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UtilityError::Argument(_) => ErrorKind::Argument,
            UtilityError::KeyMaterial(_) => ErrorKind::KeyMaterial,
            UtilityError::CryptoOperation(_) => ErrorKind::CryptoOperation,
            UtilityError::EncodingInvariant(_) => ErrorKind::EncodingInvariant,
            UtilityError::Format(_) => ErrorKind::Format,
        }
    }

    /// The underlying reason, without the kind prefix.
    pub fn reason(&self) -> &str {
        match self {
            UtilityError::Argument(msg)
            | UtilityError::KeyMaterial(msg)
            | UtilityError::CryptoOperation(msg)
            | UtilityError::EncodingInvariant(msg)
            | UtilityError::Format(msg) => msg,
        }
    }
}

/// Base64 decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid base64 character {byte:#04x} at offset {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },

    #[error("invalid base64 length")]
    InvalidLength,

    #[error("invalid base64 padding")]
    InvalidPadding,

    #[error("invalid trailing bits in final base64 symbol {byte:#04x} at offset {offset}")]
    InvalidTrailingBits { offset: usize, byte: u8 },
}

/// Result type for computations.
pub type Result<T> = std::result::Result<T, UtilityError>;
