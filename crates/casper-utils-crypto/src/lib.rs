//! # Casper Utils Crypto
//!
//! The cryptographic computations of casper-utils.
//!
//! Every computation here implements [`Computation`](casper_utils_core::Computation):
//! it is built from its arguments, executed once, and then drained of rows.
//!
//! ## Computations
//!
//! - [`JwtIssuer`] - Signs a claim document into a JWT; one row `[token]`
//! - [`InvoiceHash`] - RSA-SHA1 signature of an invoice summary; one row `[long, short]`
//! - [`PublicLink`] - AES-256-CBC encrypted entity reference; one row `[url]`
//!
//! ## Runtime
//!
//! The process-wide crypto runtime is initialized lazily on first use and runs
//! known-answer self tests before any key is touched. See [`runtime`].
//!
//! ## Key Material
//!
//! Private keys are PEM files located by a [`KeyRef`](casper_utils_core::KeyRef).
//! They are read once per execute into zeroizing buffers and never logged;
//! logs carry a [`KeyFingerprint`](casper_utils_core::KeyFingerprint) instead.

pub mod clock;
pub mod invoice_hash;
pub mod jwt;
pub mod keys;
pub mod public_link;
pub mod runtime;

pub use clock::{iso8601_with_offset, Clock, FixedClock, SystemClock};
pub use invoice_hash::{short_hash, InvoiceHash, InvoiceSignature, LONG_HASH_LEN, SHORT_HASH_OFFSETS};
pub use jwt::{parse_claims, slashify, JwtConfig, JwtIssuer, DEFAULT_ISSUER};
pub use keys::PemKey;
pub use public_link::{encrypt_token, LinkPayload, LinkSecrets, PublicLink, PublicLinkConfig};
pub use runtime::RuntimeState;
