//! JSON Web Token issuance.
//!
//! Claims come from a JSON object supplied by the caller and are copied
//! verbatim as unregistered claims. The signing algorithm follows from the
//! private key material; see [`PemKey::jwt_algorithm`].

use std::sync::Arc;

use jsonwebtoken::Header;
use serde_json::{Map, Value};

use casper_utils_core::{
    Computation, ErrorSlot, KeyRef, Result, ResultRow, RowSet, UtilityError,
};

use crate::clock::{Clock, SystemClock};
use crate::keys::PemKey;
use crate::runtime;

/// Default issuer identity.
pub const DEFAULT_ISSUER: &str = "casper-utils";

/// Width of the first slashified segment.
pub const FIRST_SEGMENT_LEN: usize = 40;

/// Width of every following slashified segment.
pub const SEGMENT_LEN: usize = 100;

/// Configuration shared by JWT issuers.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Value of the `iss` claim.
    pub issuer: String,
    /// Source of `iat`.
    pub clock: Arc<dyn Clock>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            clock: Arc::new(SystemClock),
        }
    }
}

/// Issues one signed token.
///
/// Produces a single row with one field: the encoded token.
#[derive(Debug)]
pub struct JwtIssuer {
    config: JwtConfig,
    key: KeyRef,
    claims_document: String,
    duration_secs: u64,
    token: Option<String>,
    error: ErrorSlot,
}

impl JwtIssuer {
    /// Create an issuer for one token.
    pub fn new(
        config: JwtConfig,
        key: KeyRef,
        claims_document: impl Into<String>,
        duration_secs: u64,
    ) -> Self {
        Self {
            config,
            key,
            claims_document: claims_document.into(),
            duration_secs,
            token: None,
            error: ErrorSlot::new(),
        }
    }

    /// The issued token, once executed.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn issue(&self) -> Result<String> {
        runtime::ensure_ready()?;

        let mut claims = parse_claims(&self.claims_document)?;

        let key = PemKey::load(&self.key)?;
        let (algorithm, encoding_key) = key.to_jwt_key()?;
        drop(key);

        let issued_at = self.config.clock.now().timestamp();
        let duration = i64::try_from(self.duration_secs)
            .map_err(|_| UtilityError::Argument(format!("duration {} out of range", self.duration_secs)))?;
        let expires_at = issued_at
            .checked_add(duration)
            .ok_or_else(|| UtilityError::Argument(format!("duration {} out of range", duration)))?;

        claims.insert("iss".into(), Value::String(self.config.issuer.clone()));
        claims.insert("iat".into(), Value::from(issued_at));
        claims.insert("exp".into(), Value::from(expires_at));

        let token = jsonwebtoken::encode(&Header::new(algorithm), &claims, &encoding_key)
            .map_err(|e| UtilityError::CryptoOperation(format!("unable to sign token: {}", e)))?;

        tracing::debug!(?algorithm, claims = claims.len(), "issued token");
        Ok(token)
    }
}

impl Computation for JwtIssuer {
    fn kind(&self) -> &'static str {
        "make_jwt"
    }

    fn execute(&mut self) -> Result<()> {
        let outcome = self.issue();
        let token = self.error.track(outcome)?;
        self.token = Some(token);
        Ok(())
    }

    fn last_error(&self) -> &str {
        self.error.as_str()
    }

    fn produce_rows(&mut self) -> RowSet {
        self.token
            .take()
            .map(|token| RowSet::from(ResultRow::single(token)))
            .unwrap_or_default()
    }
}

/// Parse a claim document into a claim set.
///
/// The document must be a JSON object. Duplicate members resolve to the last
/// occurrence.
pub fn parse_claims(document: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(document) {
        Ok(Value::Object(claims)) => Ok(claims),
        Ok(other) => Err(UtilityError::Format(format!(
            "claim document must be a JSON object, got {}",
            json_type(&other)
        ))),
        Err(e) => Err(UtilityError::Format(format!("invalid claim document: {}", e))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Rewrite a token as a URL path of fixed-width segments.
///
/// The first segment is 40 characters, every following segment 100, the last
/// one holding the remainder. `base_url` gains a trailing `/` if it lacks one.
pub fn slashify(base_url: &str, token: &str) -> Result<String> {
    if token.len() < FIRST_SEGMENT_LEN {
        return Err(UtilityError::Format(format!(
            "token too short: {} characters, need at least {}",
            token.len(),
            FIRST_SEGMENT_LEN
        )));
    }
    if token.split('.').count() != 3 {
        return Err(UtilityError::Format(
            "token must have exactly three dot-separated parts".into(),
        ));
    }
    if !token.is_ascii() {
        return Err(UtilityError::Format("token must be ASCII".into()));
    }

    let (first, mut rest) = token.split_at(FIRST_SEGMENT_LEN);
    let mut url = String::with_capacity(base_url.len() + token.len() + token.len() / SEGMENT_LEN + 2);
    url.push_str(base_url);
    if !base_url.ends_with('/') {
        url.push('/');
    }
    url.push_str(first);
    while !rest.is_empty() {
        let (segment, tail) = rest.split_at(rest.len().min(SEGMENT_LEN));
        url.push('/');
        url.push_str(segment);
        rest = tail;
    }
    Ok(url)
}
