//! Host bridge.
//!
//! Hosts hand over nullable arguments. The bridge checks required-ness,
//! builds a [`ComputationFactory`] for a [`CallSession`], and drives calls
//! into a [`RowSink`].

use casper_utils_core::{Computation, KeyRef, ResultRow, UtilityError};
use casper_utils_crypto::{InvoiceHash, JwtIssuer, LinkSecrets, PublicLink};
use casper_utils_session::{run_to_completion, CallSession, ComputationFactory, RowSink};

use crate::config::UtilsConfig;
use crate::error::Result;
use crate::info::{Info, Version};

/// Arguments of `make_jwt`.
#[derive(Debug, Clone, Default)]
pub struct MakeJwtArgs {
    /// Claim document, a JSON object.
    pub payload: Option<String>,
    /// Token lifetime in seconds.
    pub duration: Option<i64>,
    /// Private key locator.
    pub private_key_uri: Option<String>,
}

/// Arguments of `invoice_hash`.
#[derive(Debug, Clone, Default)]
pub struct InvoiceHashArgs {
    /// RSA private key locator.
    pub pem_uri: Option<String>,
    /// Invoice summary to sign.
    pub payload: Option<String>,
}

/// Arguments of `public_link`.
#[derive(Clone, Default)]
pub struct PublicLinkArgs {
    pub base_url: Option<String>,
    pub company_id: Option<i64>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    /// Base64 AES-256 key.
    pub key: Option<String>,
    /// Base64 CBC IV.
    pub iv: Option<String>,
}

impl std::fmt::Debug for PublicLinkArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicLinkArgs")
            .field("base_url", &self.base_url)
            .field("company_id", &self.company_id)
            .field("entity_type", &self.entity_type)
            .field("entity_id", &self.entity_id)
            .finish_non_exhaustive()
    }
}

fn required<T>(value: Option<T>, function: &str, argument: &str) -> Result<T> {
    value.ok_or_else(|| {
        UtilityError::Argument(format!(
            "{}(...) - {} argument can not be null!",
            function, argument
        ))
        .into()
    })
}

fn boxed(computation: impl Computation + 'static) -> ComputationFactory {
    Box::new(move || Ok(Box::new(computation) as Box<dyn Computation>))
}

/// Validate `make_jwt` arguments and build its factory.
pub fn make_jwt(config: &UtilsConfig, args: MakeJwtArgs) -> Result<ComputationFactory> {
    let payload = required(args.payload, "make_jwt", "payload")?;
    let duration = required(args.duration, "make_jwt", "duration")?;
    let key = required(args.private_key_uri, "make_jwt", "private key uri")?;

    let duration = u64::try_from(duration).map_err(|_| {
        UtilityError::Argument(format!(
            "make_jwt(...) - duration must not be negative, got {}",
            duration
        ))
    })?;

    Ok(boxed(JwtIssuer::new(
        config.jwt(),
        KeyRef::new(key),
        payload,
        duration,
    )))
}

/// Validate `invoice_hash` arguments and build its factory.
pub fn invoice_hash(args: InvoiceHashArgs) -> Result<ComputationFactory> {
    let key = required(args.pem_uri, "invoice_hash", "pem uri")?;
    let payload = required(args.payload, "invoice_hash", "payload")?;

    Ok(boxed(InvoiceHash::new(KeyRef::new(key), payload)))
}

/// Validate `public_link` arguments and build its factory.
pub fn public_link(config: &UtilsConfig, args: PublicLinkArgs) -> Result<ComputationFactory> {
    let base_url = required(args.base_url, "public_link", "base url")?;
    let company_id = required(args.company_id, "public_link", "company id")?;
    let entity_type = required(args.entity_type, "public_link", "entity type")?;
    let entity_id = required(args.entity_id, "public_link", "entity id")?;
    let key = required(args.key, "public_link", "key")?;
    let iv = required(args.iv, "public_link", "iv")?;

    Ok(boxed(PublicLink::new(
        config.public_link(),
        LinkSecrets::new(key, iv),
        base_url,
        company_id,
        entity_type,
        entity_id,
    )))
}

/// Factory for the version utility.
pub fn version() -> ComputationFactory {
    boxed(Version::new())
}

/// Factory for the info utility.
pub fn info() -> ComputationFactory {
    boxed(Info::new())
}

struct LoggingSink<'a>(&'a mut dyn RowSink);

impl RowSink for LoggingSink<'_> {
    fn accept(&mut self, row: ResultRow) {
        tracing::debug!(fields = ?row.fields(), "delivering row");
        self.0.accept(row);
    }

    fn accept_null(&mut self) {
        tracing::debug!("delivering empty row");
        self.0.accept_null();
    }
}

/// Run one call to completion.
///
/// Returns the number of positions delivered to `sink`.
pub fn call(
    config: &UtilsConfig,
    factory: ComputationFactory,
    sink: &mut dyn RowSink,
) -> Result<usize> {
    let mut session = CallSession::new(factory);
    let delivered = if config.log_rows {
        run_to_completion(&mut session, &mut LoggingSink(sink))?
    } else {
        run_to_completion(&mut session, sink)?
    };
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casper_utils_core::ErrorKind;
    use crate::error::BridgeError;

    fn argument_message(result: Result<ComputationFactory>) -> String {
        match result {
            Err(BridgeError::Utility(UtilityError::Argument(msg))) => msg,
            Err(other) => panic!("unexpected error {:?}", other),
            Ok(_) => panic!("expected an argument error"),
        }
    }

    #[test]
    fn test_make_jwt_requires_payload() {
        let args = MakeJwtArgs {
            payload: None,
            duration: Some(60),
            private_key_uri: Some("file:///k.pem".into()),
        };
        assert_eq!(
            argument_message(make_jwt(&UtilsConfig::default(), args)),
            "make_jwt(...) - payload argument can not be null!"
        );
    }

    #[test]
    fn test_make_jwt_rejects_negative_duration() {
        let args = MakeJwtArgs {
            payload: Some("{}".into()),
            duration: Some(-1),
            private_key_uri: Some("/k.pem".into()),
        };
        assert!(argument_message(make_jwt(&UtilsConfig::default(), args)).contains("negative"));
    }

    #[test]
    fn test_invoice_hash_requires_pem_uri() {
        let args = InvoiceHashArgs {
            pem_uri: None,
            payload: Some("x".into()),
        };
        assert_eq!(
            argument_message(invoice_hash(args)),
            "invoice_hash(...) - pem uri argument can not be null!"
        );
    }

    #[test]
    fn test_public_link_requires_every_argument() {
        let full = PublicLinkArgs {
            base_url: Some("https://x".into()),
            company_id: Some(1),
            entity_type: Some("invoice".into()),
            entity_id: Some(42),
            key: Some("k".into()),
            iv: Some("i".into()),
        };
        assert!(public_link(&UtilsConfig::default(), full.clone()).is_ok());

        let cases: [(&str, fn(&mut PublicLinkArgs)); 6] = [
            ("base url", |a| a.base_url = None),
            ("company id", |a| a.company_id = None),
            ("entity type", |a| a.entity_type = None),
            ("entity id", |a| a.entity_id = None),
            ("key", |a| a.key = None),
            ("iv", |a| a.iv = None),
        ];
        for (name, clear) in cases {
            let mut args = full.clone();
            clear(&mut args);
            assert_eq!(
                argument_message(public_link(&UtilsConfig::default(), args)),
                format!("public_link(...) - {} argument can not be null!", name)
            );
        }
    }

    #[test]
    fn test_public_link_args_debug_hides_secrets() {
        let args = PublicLinkArgs {
            key: Some("c2VjcmV0".into()),
            ..Default::default()
        };
        assert!(!format!("{:?}", args).contains("c2VjcmV0"));
    }

    #[test]
    fn test_call_version() {
        let mut rows: Vec<ResultRow> = Vec::new();
        let delivered = call(&UtilsConfig::default(), version(), &mut rows).unwrap();
        assert_eq!(delivered, 1);
        assert_eq!(rows[0].get(0), Some(crate::info::VERSION));
    }

    #[test]
    fn test_call_surfaces_computation_failure() {
        let args = InvoiceHashArgs {
            pem_uri: Some("/nonexistent/casper/key.pem".into()),
            payload: Some("x".into()),
        };
        let mut rows: Vec<ResultRow> = Vec::new();
        let err = call(&UtilsConfig::default(), invoice_hash(args).unwrap(), &mut rows).unwrap_err();
        assert_eq!(err.utility().map(UtilityError::kind), Some(ErrorKind::KeyMaterial));
        assert!(rows.is_empty());
    }
}
