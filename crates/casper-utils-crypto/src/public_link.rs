//! Public link tokens.
//!
//! A public link points at one entity of one company without exposing the
//! identifiers. The payload is serialized to compact JSON, encrypted with
//! AES-256-CBC under a configured key and IV, and appended to a base URL as
//! unpadded base64url.

use std::fmt;
use std::sync::Arc;

use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use casper_utils_core::{
    codec, Computation, ErrorSlot, KeyFingerprint, Result, ResultRow, RowSet, UtilityError,
};

use crate::clock::{iso8601_with_offset, Clock, SystemClock};
use crate::runtime;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = 16;

/// Configuration for public link computations.
#[derive(Debug, Clone)]
pub struct PublicLinkConfig {
    /// Source of the payload timestamp.
    pub clock: Arc<dyn Clock>,
}

impl Default for PublicLinkConfig {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
        }
    }
}

/// Base64 encoded symmetric key and IV.
///
/// Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LinkSecrets {
    key: String,
    iv: String,
}

impl LinkSecrets {
    /// Wrap a base64 key and IV, as configured.
    pub fn new(key_b64: impl Into<String>, iv_b64: impl Into<String>) -> Self {
        Self {
            key: key_b64.into(),
            iv: iv_b64.into(),
        }
    }

    /// Decode into raw key and IV bytes.
    ///
    /// Empty values are a configuration error: the cipher has no usable
    /// default key or IV.
    pub fn decode(&self) -> Result<(Zeroizing<Vec<u8>>, Zeroizing<Vec<u8>>)> {
        let key = decode_secret("key", &self.key, KEY_LEN)?;
        let iv = decode_secret("iv", &self.iv, IV_LEN)?;
        Ok((key, iv))
    }
}

impl fmt::Debug for LinkSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LinkSecrets(..)")
    }
}

fn decode_secret(name: &str, b64: &str, expected: usize) -> Result<Zeroizing<Vec<u8>>> {
    if b64.is_empty() {
        return Err(UtilityError::KeyMaterial(format!("{} must not be empty", name)));
    }
    let bytes = codec::decode(b64)
        .map(Zeroizing::new)
        .map_err(|e| UtilityError::KeyMaterial(format!("{} is not valid base64: {}", name, e)))?;
    if bytes.len() != expected {
        return Err(UtilityError::KeyMaterial(format!(
            "{} must decode to {} bytes, got {}",
            name,
            expected,
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// The record a link token carries.
///
/// Members are declared in lexical order so that the compact JSON form is
/// canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkPayload {
    pub company_id: i64,
    pub entity_id: i64,
    pub entity_type: String,
    pub timestamp: String,
}

impl LinkPayload {
    /// Canonical text form: compact JSON terminated by a newline.
    pub fn to_canonical(&self) -> Result<Zeroizing<Vec<u8>>> {
        let mut text = serde_json::to_vec(self)
            .map_err(|e| UtilityError::Format(format!("unable to serialize link payload: {}", e)))?;
        text.push(b'\n');
        Ok(Zeroizing::new(text))
    }
}

/// Encrypt a payload into an unpadded base64url token.
pub fn encrypt_token(payload: &LinkPayload, key: &[u8], iv: &[u8]) -> Result<String> {
    let plaintext = payload.to_canonical()?;
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| UtilityError::CryptoOperation(format!("unable to initialize cipher: {}", e)))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(&plaintext);
    Ok(codec::encode_url_unpadded(&ciphertext))
}

/// Builds one public link URL.
///
/// Produces a single row with one field: `base_url + "/" + token`.
#[derive(Debug)]
pub struct PublicLink {
    config: PublicLinkConfig,
    secrets: LinkSecrets,
    base_url: String,
    company_id: i64,
    entity_type: String,
    entity_id: i64,
    url: Option<String>,
    error: ErrorSlot,
}

impl PublicLink {
    /// Create a link builder for one entity.
    pub fn new(
        config: PublicLinkConfig,
        secrets: LinkSecrets,
        base_url: impl Into<String>,
        company_id: i64,
        entity_type: impl Into<String>,
        entity_id: i64,
    ) -> Self {
        Self {
            config,
            secrets,
            base_url: base_url.into(),
            company_id,
            entity_type: entity_type.into(),
            entity_id,
            url: None,
            error: ErrorSlot::new(),
        }
    }

    /// The built URL, once executed.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn calculate(&self) -> Result<String> {
        runtime::ensure_ready()?;

        let (key, iv) = self.secrets.decode()?;
        tracing::debug!(key = %KeyFingerprint::of(&key), "encrypting public link");

        let payload = LinkPayload {
            company_id: self.company_id,
            entity_id: self.entity_id,
            entity_type: self.entity_type.clone(),
            timestamp: iso8601_with_offset(&self.config.clock.now()),
        };
        let token = encrypt_token(&payload, &key, &iv)?;
        Ok(format!("{}/{}", self.base_url, token))
    }
}

impl Computation for PublicLink {
    fn kind(&self) -> &'static str {
        "public_link"
    }

    fn execute(&mut self) -> Result<()> {
        let outcome = self.calculate();
        let url = self.error.track(outcome)?;
        self.url = Some(url);
        Ok(())
    }

    fn last_error(&self) -> &str {
        self.error.as_str()
    }

    fn produce_rows(&mut self) -> RowSet {
        self.url
            .take()
            .map(|url| RowSet::from(ResultRow::single(url)))
            .unwrap_or_default()
    }
}
