//! # Casper Utils
//!
//! A host-callable utility layer for security-sensitive, single-shot
//! computations. Results stream back to the host one row per call entry.
//!
//! ## Overview
//!
//! This is the main entry point, re-exporting the component crates:
//!
//! - [`core`] - Codec, computation contract, error taxonomy
//! - [`crypto`] - JWT issuance, invoice hashes, public links, crypto runtime
//! - [`session`] - The resumable call session
//!
//! ## Utilities
//!
//! | Function | Row |
//! |---|---|
//! | [`make_jwt`] | `[token]` |
//! | [`invoice_hash`] | `[long, short]` |
//! | [`public_link`] | `[url]` |
//! | [`version`] | `[version]` |
//! | [`info`] | `[version, target, name, backends]` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use casper_utils::{call, invoice_hash, InvoiceHashArgs, ResultRow, UtilsConfig};
//!
//! let config = UtilsConfig::default();
//! let factory = invoice_hash(InvoiceHashArgs {
//!     pem_uri: Some("file:///etc/casper/invoice.pem".into()),
//!     payload: Some("2010-05-18;2010-05-18T11:22:19;FAC 001/14;3.12;".into()),
//! })?;
//!
//! let mut rows: Vec<ResultRow> = Vec::new();
//! call(&config, factory, &mut rows)?;
//! println!("short hash: {}", rows[0].get(1).unwrap_or_default());
//! # Ok::<(), casper_utils::BridgeError>(())
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod info;

pub use casper_utils_core as core;
pub use casper_utils_crypto as crypto;
pub use casper_utils_session as session;

pub use bridge::{
    call, info, invoice_hash, make_jwt, public_link, version, InvoiceHashArgs, MakeJwtArgs,
    PublicLinkArgs,
};
pub use config::UtilsConfig;
pub use error::{BridgeError, Result};

pub use casper_utils_core::{Computation, ErrorKind, KeyRef, ResultRow, RowSet, UtilityError};
pub use casper_utils_crypto::{slashify, Clock, FixedClock, SystemClock};
pub use casper_utils_session::{CallSession, ComputationFactory, RowSink, SessionError, SessionState, Step};
