//! # Casper Utils Session
//!
//! The resumable call protocol between a polling host and a [`Computation`].
//!
//! ## Overview
//!
//! A host cannot receive all rows of a call at once. It re-enters the same
//! [`CallSession`] until the session reports [`Step::Done`]:
//!
//! - The first entry builds the computation from a factory, executes it and
//!   fixes the number of rows (the bound).
//! - Each entry delivers the row at the cursor and advances it.
//! - The entry that finds `cursor == bound` releases the rows and finishes.
//!
//! A failed execution surfaces once as a [`SessionError`] and no rows are
//! delivered. Finished sessions reject further entries and never re-run
//! their factory.
//!
//! ## Usage
//!
//! ```rust
//! use casper_utils_core::{Computation, ResultRow, RowSet};
//! use casper_utils_session::{run_to_completion, CallSession};
//!
//! struct Hello;
//!
//! impl Computation for Hello {
//!     fn kind(&self) -> &'static str { "hello" }
//!     fn execute(&mut self) -> casper_utils_core::Result<()> { Ok(()) }
//!     fn last_error(&self) -> &str { "" }
//!     fn produce_rows(&mut self) -> RowSet { ResultRow::single("hello").into() }
//! }
//!
//! let mut session = CallSession::new(|| Ok(Box::new(Hello) as Box<dyn Computation>));
//! let mut rows: Vec<ResultRow> = Vec::new();
//! run_to_completion(&mut session, &mut rows).unwrap();
//! assert_eq!(rows, vec![ResultRow::single("hello")]);
//! ```
//!
//! [`Computation`]: casper_utils_core::Computation

pub mod error;
pub mod session;
pub mod sink;

pub use error::{Result, SessionError};
pub use session::{CallSession, ComputationFactory, SessionState, Step};
pub use sink::{run_to_completion, RowSink};
