//! Bridge configuration.

use std::sync::Arc;

use casper_utils_crypto::{Clock, JwtConfig, PublicLinkConfig, SystemClock, DEFAULT_ISSUER};

/// Settings shared by every call the bridge builds.
#[derive(Debug, Clone)]
pub struct UtilsConfig {
    /// JWT issuer identity.
    pub issuer: String,
    /// Time source for JWT `iat`/`exp` and link timestamps.
    pub clock: Arc<dyn Clock>,
    /// Log delivered row values at debug level.
    pub log_rows: bool,
}

impl Default for UtilsConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            clock: Arc::new(SystemClock),
            log_rows: false,
        }
    }
}

impl UtilsConfig {
    /// Set the JWT issuer identity.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Enable or disable logging of delivered rows.
    pub fn with_log_rows(mut self, log_rows: bool) -> Self {
        self.log_rows = log_rows;
        self
    }

    pub(crate) fn jwt(&self) -> JwtConfig {
        JwtConfig {
            issuer: self.issuer.clone(),
            clock: Arc::clone(&self.clock),
        }
    }

    pub(crate) fn public_link(&self) -> PublicLinkConfig {
        PublicLinkConfig {
            clock: Arc::clone(&self.clock),
        }
    }
}
