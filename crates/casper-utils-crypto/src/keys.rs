//! Private key loading.
//!
//! Keys are read from a [`KeyRef`] once per computation, decoded from PEM into
//! zeroizing buffers, and dropped before the computation hands over its rows.

use jsonwebtoken::{Algorithm, EncodingKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::der::pem;
use rsa::pkcs8::{DecodePrivateKey, PrivateKeyInfo};
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use casper_utils_core::{KeyFingerprint, KeyRef, Result, UtilityError};

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_DASHES: &str = "-----";

/// Labels of the private key blocks a key file may carry.
const PRIVATE_KEY_LABELS: [&str; 3] = ["RSA PRIVATE KEY", "PRIVATE KEY", "EC PRIVATE KEY"];

const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
const OID_ED25519: &str = "1.3.101.112";
const OID_CURVE_P256: &str = "1.2.840.10045.3.1.7";
const OID_CURVE_P384: &str = "1.3.132.0.34";

/// A decoded PEM private key.
pub struct PemKey {
    label: String,
    der: Zeroizing<Vec<u8>>,
    fingerprint: KeyFingerprint,
}

impl PemKey {
    /// Read and decode the key a locator points at.
    pub fn load(key_ref: &KeyRef) -> Result<Self> {
        let path = key_ref.path();
        let text = std::fs::read_to_string(&path)
            .map(Zeroizing::new)
            .map_err(|e| {
                UtilityError::KeyMaterial(format!(
                    "unable to read private key file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        let key = Self::parse(&text)?;
        tracing::debug!(key = %key.fingerprint, label = %key.label, "loaded private key");
        Ok(key)
    }

    /// Decode the first private key block in `text`.
    ///
    /// Blocks with other labels, such as the certificates of a cert and key
    /// bundle, are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rest = text;
        let mut skipped = 0usize;
        while let Some(start) = rest.find(PEM_BEGIN) {
            let block = &rest[start..];
            let label = block[PEM_BEGIN.len()..]
                .split_once(PEM_DASHES)
                .map(|(label, _)| label)
                .filter(|label| !label.contains('\n'))
                .ok_or_else(|| UtilityError::KeyMaterial("malformed PEM boundary".into()))?;

            let end = format!("-----END {}-----", label);
            let end_at = block.find(&end).ok_or_else(|| {
                UtilityError::KeyMaterial(format!("PEM block '{}' is not terminated", label))
            })?;
            let (pem_block, tail) = block.split_at(end_at + end.len());
            rest = tail;

            if !PRIVATE_KEY_LABELS.contains(&label) {
                tracing::debug!(label, "skipping PEM block");
                skipped += 1;
                continue;
            }
            if pem_block.contains("Proc-Type:") {
                return Err(UtilityError::KeyMaterial(
                    "encrypted PEM keys are not supported".into(),
                ));
            }

            let der = pem::decode_vec(pem_block.as_bytes())
                .map(|(_, der)| Zeroizing::new(der))
                .map_err(|e| UtilityError::KeyMaterial(format!("invalid PEM block '{}': {}", label, e)))?;
            if der.is_empty() {
                return Err(UtilityError::KeyMaterial("empty PEM body".into()));
            }
            let fingerprint = KeyFingerprint::of(&der);

            return Ok(Self {
                label: label.to_string(),
                der,
                fingerprint,
            });
        }

        if skipped == 0 {
            Err(UtilityError::KeyMaterial("no PEM block found".into()))
        } else {
            Err(UtilityError::KeyMaterial(format!(
                "no private key among {} PEM block(s)",
                skipped
            )))
        }
    }

    /// The PEM label, e.g. `RSA PRIVATE KEY`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The decoded DER bytes.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Fingerprint of the DER bytes.
    pub fn fingerprint(&self) -> KeyFingerprint {
        self.fingerprint
    }

    /// Interpret as an RSA private key (PKCS#1 or PKCS#8).
    pub fn to_rsa(&self) -> Result<RsaPrivateKey> {
        match self.label.as_str() {
            "RSA PRIVATE KEY" => RsaPrivateKey::from_pkcs1_der(&self.der)
                .map_err(|e| UtilityError::KeyMaterial(format!("invalid RSA private key: {}", e))),
            "PRIVATE KEY" => RsaPrivateKey::from_pkcs8_der(&self.der)
                .map_err(|e| UtilityError::KeyMaterial(format!("invalid RSA private key: {}", e))),
            other => Err(UtilityError::KeyMaterial(format!(
                "expected an RSA private key, got '{}'",
                other
            ))),
        }
    }

    /// The JWT algorithm this key signs with.
    pub fn jwt_algorithm(&self) -> Result<Algorithm> {
        match self.label.as_str() {
            "RSA PRIVATE KEY" => Ok(Algorithm::RS256),
            "PRIVATE KEY" => {
                let info = PrivateKeyInfo::try_from(self.der.as_slice()).map_err(|e| {
                    UtilityError::KeyMaterial(format!("invalid PKCS#8 private key: {}", e))
                })?;
                match info.algorithm.oid.to_string().as_str() {
                    OID_RSA_ENCRYPTION => Ok(Algorithm::RS256),
                    OID_ED25519 => Ok(Algorithm::EdDSA),
                    OID_EC_PUBLIC_KEY => {
                        let curve = info.algorithm.parameters_oid().map_err(|e| {
                            UtilityError::KeyMaterial(format!("EC key without named curve: {}", e))
                        })?;
                        match curve.to_string().as_str() {
                            OID_CURVE_P256 => Ok(Algorithm::ES256),
                            OID_CURVE_P384 => Ok(Algorithm::ES384),
                            other => Err(UtilityError::KeyMaterial(format!(
                                "unsupported EC curve {}",
                                other
                            ))),
                        }
                    }
                    other => Err(UtilityError::KeyMaterial(format!(
                        "unsupported private key algorithm {}",
                        other
                    ))),
                }
            }
            "EC PRIVATE KEY" => Err(UtilityError::KeyMaterial(
                "SEC1 EC keys must be converted to PKCS#8".into(),
            )),
            other => Err(UtilityError::KeyMaterial(format!(
                "unsupported PEM label '{}'",
                other
            ))),
        }
    }

    /// Build a JWT encoding key together with its algorithm.
    pub fn to_jwt_key(&self) -> Result<(Algorithm, EncodingKey)> {
        let algorithm = self.jwt_algorithm()?;
        let key = match algorithm {
            Algorithm::RS256 => {
                // The signer takes PKCS#1 DER.
                let pkcs1 = self
                    .to_rsa()?
                    .to_pkcs1_der()
                    .map_err(|e| UtilityError::KeyMaterial(format!("invalid RSA private key: {}", e)))?;
                EncodingKey::from_rsa_der(pkcs1.as_bytes())
            }
            Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_der(&self.der),
            Algorithm::EdDSA => EncodingKey::from_ed_der(&self.der),
            other => {
                return Err(UtilityError::KeyMaterial(format!(
                    "unsupported JWT algorithm {:?}",
                    other
                )))
            }
        };
        Ok((algorithm, key))
    }
}
