//! Test fixtures and helpers.
//!
//! Key material lives in a temporary directory for the lifetime of a
//! [`TestKeys`] so computations can read it through a [`KeyRef`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use casper_utils_core::KeyRef;
use casper_utils_crypto::{FixedClock, LinkSecrets};
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::EncodePrivateKey;
use ed25519_dalek::SigningKey;
use tempfile::TempDir;

/// RSA-1024, PKCS#1. Signs invoice hashes.
pub const RSA_1024_PEM: &str = include_str!("../keys/rsa1024.pem");

/// The same RSA-1024 key, PKCS#8.
pub const RSA_1024_PKCS8_PEM: &str = include_str!("../keys/rsa1024-pkcs8.pem");

/// RSA-2048, PKCS#1. Signs RS256 tokens; too large for invoice hashes.
pub const RSA_2048_PEM: &str = include_str!("../keys/rsa2048.pem");

/// EC P-256, PKCS#8.
pub const EC_P256_PEM: &str = include_str!("../keys/ec-p256.pem");

/// Seed of the Ed25519 test key.
pub const ED25519_SEED: [u8; 32] = [0x5a; 32];

/// Instant the fixed clock reports.
pub const FIXED_TIME: &str = "2024-01-15T10:30:00+00:00";

/// Unix time of [`FIXED_TIME`].
pub const FIXED_UNIX: i64 = 1_705_314_600;

/// Base64 link key: bytes `0x00..=0x1f`.
pub const LINK_KEY_B64: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";

/// Base64 link IV: bytes `0xa0..=0xaf`.
pub const LINK_IV_B64: &str = "oKGio6SlpqeoqaqrrK2urw==";

/// The test keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKey {
    Rsa1024,
    Rsa1024Pkcs8,
    Rsa2048,
    EcP256,
    Ed25519,
}

impl TestKey {
    /// Every test key.
    pub const ALL: [TestKey; 5] = [
        TestKey::Rsa1024,
        TestKey::Rsa1024Pkcs8,
        TestKey::Rsa2048,
        TestKey::EcP256,
        TestKey::Ed25519,
    ];

    fn file_name(self) -> &'static str {
        match self {
            TestKey::Rsa1024 => "rsa1024.pem",
            TestKey::Rsa1024Pkcs8 => "rsa1024-pkcs8.pem",
            TestKey::Rsa2048 => "rsa2048.pem",
            TestKey::EcP256 => "ec-p256.pem",
            TestKey::Ed25519 => "ed25519.pem",
        }
    }

    /// PEM text of the key.
    pub fn pem(self) -> String {
        match self {
            TestKey::Rsa1024 => RSA_1024_PEM.to_string(),
            TestKey::Rsa1024Pkcs8 => RSA_1024_PKCS8_PEM.to_string(),
            TestKey::Rsa2048 => RSA_2048_PEM.to_string(),
            TestKey::EcP256 => EC_P256_PEM.to_string(),
            TestKey::Ed25519 => ed25519_pem(ED25519_SEED),
        }
    }
}

/// PKCS#8 PEM of the Ed25519 key derived from `seed`.
pub fn ed25519_pem(seed: [u8; 32]) -> String {
    SigningKey::from_bytes(&seed)
        .to_pkcs8_pem(LineEnding::LF)
        .expect("ed25519 key encodes as PKCS#8")
        .to_string()
}

/// Test keys written to a temporary directory.
pub struct TestKeys {
    dir: TempDir,
}

impl TestKeys {
    /// Write every test key.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        for key in TestKey::ALL {
            fs::write(dir.path().join(key.file_name()), key.pem())?;
        }
        Ok(Self { dir })
    }

    /// Directory holding the keys.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of one key.
    pub fn path(&self, key: TestKey) -> PathBuf {
        self.dir.path().join(key.file_name())
    }

    /// Locator of one key, as a plain path.
    pub fn key_ref(&self, key: TestKey) -> KeyRef {
        KeyRef::from(self.path(key).as_path())
    }

    /// Locator of one key, as a `file://` URI.
    pub fn uri(&self, key: TestKey) -> String {
        format!("file://{}", self.path(key).display())
    }

    /// Write arbitrary key text next to the test keys.
    pub fn write(&self, name: &str, pem: &str) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, pem)?;
        Ok(path)
    }
}

/// A clock stuck at [`FIXED_TIME`].
pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::parse(FIXED_TIME).expect("valid fixed time"))
}

/// The link key and IV.
pub fn link_secrets() -> LinkSecrets {
    LinkSecrets::new(LINK_KEY_B64, LINK_IV_B64)
}
