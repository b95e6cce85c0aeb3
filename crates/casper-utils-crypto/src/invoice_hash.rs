//! Invoice hash signing.
//!
//! An invoice hash is the RSA-SHA1 signature of the invoice summary, rendered
//! with the fixed-table base64 codec. The short form is four characters picked
//! from the long form at fixed offsets.

use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha1::Sha1;

use casper_utils_core::{
    codec, Computation, ErrorSlot, KeyRef, Result, ResultRow, RowSet, UtilityError,
};

use crate::keys::PemKey;
use crate::runtime;

/// Length of the encoded signature for the 1024-bit keys used in this domain.
pub const LONG_HASH_LEN: usize = 172;

/// Offsets of the long hash characters that make up the short hash.
pub const SHORT_HASH_OFFSETS: [usize; 4] = [0, 10, 20, 30];

/// A long hash and its short form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceSignature {
    pub long: String,
    pub short: String,
}

/// Signs one invoice payload.
///
/// Produces a single row with two fields: `long` and `short`.
#[derive(Debug)]
pub struct InvoiceHash {
    key: KeyRef,
    payload: String,
    signature: Option<InvoiceSignature>,
    error: ErrorSlot,
}

impl InvoiceHash {
    /// Create a signer for one payload.
    pub fn new(key: KeyRef, payload: impl Into<String>) -> Self {
        Self {
            key,
            payload: payload.into(),
            signature: None,
            error: ErrorSlot::new(),
        }
    }

    /// The computed signature, once executed.
    pub fn signature(&self) -> Option<&InvoiceSignature> {
        self.signature.as_ref()
    }

    fn calculate(&self) -> Result<InvoiceSignature> {
        runtime::ensure_ready()?;

        let key = PemKey::load(&self.key)?;
        let signing_key = SigningKey::<Sha1>::new(key.to_rsa()?);
        drop(key);

        let signature = signing_key
            .try_sign(self.payload.as_bytes())
            .map_err(|e| UtilityError::CryptoOperation(format!("unable to sign payload: {}", e)))?;

        let long = codec::encode(&signature.to_bytes());
        let short = short_hash(&long)?;
        Ok(InvoiceSignature { long, short })
    }
}

impl Computation for InvoiceHash {
    fn kind(&self) -> &'static str {
        "invoice_hash"
    }

    fn execute(&mut self) -> Result<()> {
        let outcome = self.calculate();
        let signature = self.error.track(outcome)?;
        self.signature = Some(signature);
        Ok(())
    }

    fn last_error(&self) -> &str {
        self.error.as_str()
    }

    fn produce_rows(&mut self) -> RowSet {
        self.signature
            .take()
            .map(|s| RowSet::from(ResultRow::new(vec![s.long, s.short])))
            .unwrap_or_default()
    }
}

/// Derive the short hash from a long hash.
///
/// Fails unless the long hash is exactly [`LONG_HASH_LEN`] characters.
pub fn short_hash(long: &str) -> Result<String> {
    if long.len() != LONG_HASH_LEN || !long.is_ascii() {
        return Err(UtilityError::EncodingInvariant(format!(
            "encoded signature is {} characters, expected {}",
            long.len(),
            LONG_HASH_LEN
        )));
    }
    let bytes = long.as_bytes();
    Ok(SHORT_HASH_OFFSETS
        .iter()
        .map(|&offset| char::from(bytes[offset]))
        .collect())
}
