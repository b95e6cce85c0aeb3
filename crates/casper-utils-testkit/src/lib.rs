//! # Casper Utils Testkit
//!
//! Testing utilities for casper-utils.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Fixed test keys written to a temporary directory, a fixed
//!   clock and link secrets
//! - **Golden vectors**: Invoice hashes and link tokens produced by OpenSSL
//! - **Generators**: Proptest strategies for claim documents, invoice
//!   payloads and link fields
//!
//! ## Test Fixtures
//!
//! ```rust
//! use casper_utils_testkit::fixtures::{TestKey, TestKeys};
//!
//! let keys = TestKeys::new().unwrap();
//! let key_ref = keys.key_ref(TestKey::Rsa1024);
//! assert!(key_ref.path().exists());
//! ```
//!
//! ## Golden Vectors
//!
//! ```rust
//! use casper_utils_testkit::vectors::invoice_vectors;
//!
//! for vector in invoice_vectors() {
//!     assert_eq!(vector.long.len(), 172);
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{fixed_clock, link_secrets, TestKey, TestKeys};
pub use vectors::{invoice_vectors, link_vectors, InvoiceVector, LinkVector};
