//! Strong type definitions for key material handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque locator of private key material.
///
/// Accepts a plain filesystem path or a `file://` URI. The referenced file is
/// read once per computation and never cached.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRef(String);

impl KeyRef {
    /// Create from a path or `file://` URI.
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// The locator as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The filesystem path this locator points at.
    pub fn path(&self) -> PathBuf {
        match self.0.strip_prefix("file://") {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.0),
        }
    }
}

impl fmt::Debug for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyRef({})", self.0)
    }
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for KeyRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&Path> for KeyRef {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

/// Blake3 fingerprint of key material, safe to log.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyFingerprint(pub [u8; 32]);

impl KeyFingerprint {
    /// Fingerprint the given key bytes.
    pub fn of(material: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new_derive_key("casper-utils-v0 key fingerprint");
        hasher.update(material);
        Self(*hasher.finalize().as_bytes())
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyFingerprint({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}
