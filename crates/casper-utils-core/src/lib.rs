//! # Casper Utils Core
//!
//! Pure primitives shared by every casper-utils computation.
//!
//! This crate contains no key handling and no cryptography beyond
//! fingerprinting. It defines the shapes the rest of the workspace agrees on.
//!
//! ## Key Types
//!
//! - [`Computation`] - A single-shot unit of work driven by a call session
//! - [`ResultRow`] - An ordered tuple of string fields produced by a computation
//! - [`RowSet`] - The rows a computation hands over after a successful execute
//! - [`KeyRef`] - Opaque locator of key material, read once per computation
//! - [`UtilityError`] - The error taxonomy every computation reports with
//!
//! ## Codec
//!
//! Signatures and ciphertexts are rendered with a fixed-table base64 codec.
//! See [`codec`] module.

pub mod codec;
pub mod computation;
pub mod error;
pub mod types;

pub use codec::{decode, encode, encode_url_unpadded, encoded_len, TABLE64};
pub use computation::{Computation, ErrorSlot, ResultRow, RowSet};
pub use error::{CodecError, ErrorKind, Result, UtilityError};
pub use types::{KeyFingerprint, KeyRef};
