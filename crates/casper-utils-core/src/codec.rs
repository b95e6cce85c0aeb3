//! Fixed-table base64 codec.
//!
//! Signatures are rendered with the standard 64-symbol table and `=` padding.
//! Link tokens use the URL-safe table without padding.

use base64::alphabet::Alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD, URL_SAFE_NO_PAD};
use base64::{DecodeError, Engine};

use crate::error::CodecError;

/// The encoding table, indexed by sextet value.
pub const TABLE64: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const ALPHABET: Alphabet = match Alphabet::new(TABLE64) {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("TABLE64 is not a valid base64 alphabet"),
};

const ENGINE: GeneralPurpose = GeneralPurpose::new(&ALPHABET, PAD);

/// Encode bytes with [`TABLE64`] and `=` padding.
///
/// Empty input yields an empty string.
pub fn encode(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }
    ENGINE.encode(data)
}

/// Decode text produced by [`encode`].
///
/// Padding must be canonical; any byte outside [`TABLE64`] is rejected.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    ENGINE.decode(text).map_err(CodecError::from)
}

/// Encode bytes with the URL-safe table and no padding.
pub fn encode_url_unpadded(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Length of the padded encoding of `n` bytes: `ceil(n / 3) * 4`.
pub const fn encoded_len(n: usize) -> usize {
    n.div_ceil(3) * 4
}

impl From<DecodeError> for CodecError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::InvalidByte(offset, byte) => CodecError::InvalidCharacter { offset, byte },
            DecodeError::InvalidLength(_) => CodecError::InvalidLength,
            DecodeError::InvalidLastSymbol(offset, byte) => {
                CodecError::InvalidTrailingBits { offset, byte }
            }
            DecodeError::InvalidPadding => CodecError::InvalidPadding,
        }
    }
}
