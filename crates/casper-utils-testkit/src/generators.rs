//! Proptest generators for property-based testing.

use proptest::prelude::*;

/// Arbitrary bytes up to `max_len`.
pub fn bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// A JSON scalar claim value, rendered as JSON text.
pub fn claim_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ._-]{0,24}".prop_map(|s| format!("\"{}\"", s)),
        any::<i32>().prop_map(|n| n.to_string()),
        any::<bool>().prop_map(|b| b.to_string()),
    ]
}

/// A claim name that is not registered (`iss`, `iat`, `exp`).
pub fn claim_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}".prop_filter("registered claim", |name| {
        !matches!(name.as_str(), "iss" | "iat" | "exp")
    })
}

/// A claim document: a JSON object of unregistered scalar claims.
pub fn claim_document() -> impl Strategy<Value = String> {
    prop::collection::btree_map(claim_name(), claim_value(), 0..8).prop_map(|claims| {
        let members: Vec<String> = claims
            .iter()
            .map(|(name, value)| format!("\"{}\":{}", name, value))
            .collect();
        format!("{{{}}}", members.join(","))
    })
}

/// An invoice summary in the `date;datetime;number;total;` shape.
pub fn invoice_payload() -> impl Strategy<Value = String> {
    (
        2000u32..2100,
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        1u32..10_000,
        0u32..1_000_000,
    )
        .prop_map(|(y, m, d, h, min, number, cents)| {
            format!(
                "{y:04}-{m:02}-{d:02};{y:04}-{m:02}-{d:02}T{h:02}:{min:02}:00;FT {number}/1;{}.{:02};",
                cents / 100,
                cents % 100
            )
        })
}

/// Link payload fields: company id, entity type and entity id.
pub fn link_fields() -> impl Strategy<Value = (i64, String, i64)> {
    (any::<i64>(), "[a-z_]{1,16}", any::<i64>())
}

/// A 32-byte key and 16-byte IV, base64 encoded.
pub fn link_key_iv() -> impl Strategy<Value = (String, String)> {
    (any::<[u8; 32]>(), any::<[u8; 16]>()).prop_map(|(key, iv)| {
        (
            casper_utils_core::encode(&key),
            casper_utils_core::encode(&iv),
        )
    })
}
