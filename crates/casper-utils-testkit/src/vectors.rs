//! Golden test vectors.
//!
//! Expected outputs were produced by OpenSSL from the same inputs:
//!
//! ```text
//! printf '%s' "$payload" | openssl dgst -sha1 -sign rsa1024.pem | base64 -w0
//! printf '%s\n' "$json" | openssl enc -aes-256-cbc -K "$key_hex" -iv "$iv_hex" \
//!     | base64 -w0 | tr '+/' '-_' | tr -d '='
//! ```

use crate::fixtures::{TestKey, FIXED_TIME, LINK_IV_B64, LINK_KEY_B64};

/// An invoice hash vector.
#[derive(Debug, Clone)]
pub struct InvoiceVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Signing key.
    pub key: TestKey,
    /// Signed payload.
    pub payload: &'static str,
    /// Expected long hash.
    pub long: &'static str,
    /// Expected short hash.
    pub short: &'static str,
}

/// A public link vector.
#[derive(Debug, Clone)]
pub struct LinkVector {
    pub name: &'static str,
    pub key_b64: &'static str,
    pub iv_b64: &'static str,
    pub company_id: i64,
    pub entity_type: &'static str,
    pub entity_id: i64,
    /// Timestamp the clock reports.
    pub timestamp: &'static str,
    /// Canonical plaintext, including the trailing newline.
    pub plaintext: &'static str,
    /// Expected token.
    pub token: &'static str,
}

const INVOICE_PAYLOAD: &str = "2010-05-18;2010-05-18T11:22:19;FAC 001/14;3.12;";

const INVOICE_LONG: &str = "SU3humS8COwa13PY5jQNfuteKqVEtj2uRS86dbXnqy35gOFQuYqDAlHha5tw1FqcUbEUG45bfoiw4Dh4CgIKHIDSyECXtx/mpW16r7RC5hEn2ADpc7mjXej+YyYU176xKwZeRhe04z65gKu+w+VznebB7ecJUobSgRf7U4xB8Ek=";

/// All invoice hash vectors.
pub fn invoice_vectors() -> Vec<InvoiceVector> {
    vec![
        InvoiceVector {
            name: "first invoice of a series, PKCS#1 key",
            key: TestKey::Rsa1024,
            payload: INVOICE_PAYLOAD,
            long: INVOICE_LONG,
            short: "Swf2",
        },
        InvoiceVector {
            name: "first invoice of a series, PKCS#8 key",
            key: TestKey::Rsa1024Pkcs8,
            payload: INVOICE_PAYLOAD,
            long: INVOICE_LONG,
            short: "Swf2",
        },
    ]
}

/// All public link vectors.
pub fn link_vectors() -> Vec<LinkVector> {
    vec![LinkVector {
        name: "invoice 42 of company 1",
        key_b64: LINK_KEY_B64,
        iv_b64: LINK_IV_B64,
        company_id: 1,
        entity_type: "invoice",
        entity_id: 42,
        timestamp: FIXED_TIME,
        plaintext: "{\"company_id\":1,\"entity_id\":42,\"entity_type\":\"invoice\",\"timestamp\":\"2024-01-15T10:30:00+00:00\"}\n",
        token: "io8iFRjNM8X718-RKNt51ox7iBKAUW4hPMtoua1yH7GcaSuTo6L2902tuk8yeZs7Xn2_O5uKbab6gGkfueHcphKr0IgKOLQhRqGnnjIbj6XGIqcz-90XZzA2c3vnWgDhxOnA5vjiEpIyQW28Hszbpg",
    }]
}
