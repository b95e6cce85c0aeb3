//! Computations and the rows they produce.
//!
//! A [`Computation`] is constructed with immutable configuration, executed
//! exactly once, inspected for an error and then drained of its rows. The
//! call session drives it through these steps without knowing which concrete
//! variant it holds.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UtilityError};

/// An ordered, immutable tuple of string fields.
///
/// The field count and meaning are fixed per computation variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    fields: Vec<String>,
}

impl ResultRow {
    /// Create a row from its fields.
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Create a one-field row.
    pub fn single(value: impl Into<String>) -> Self {
        Self {
            fields: vec![value.into()],
        }
    }

    /// The fields, in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// A field by position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Take ownership of the fields.
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl<S: Into<String>> FromIterator<S> for ResultRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The rows produced by one computation.
///
/// A `None` entry is a "no data" row: it occupies a position and counts
/// toward the total, but yields no tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    rows: Vec<Option<ResultRow>>,
}

impl RowSet {
    /// Create an empty row set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(Some(row));
    }

    /// Append a "no data" row.
    pub fn push_null(&mut self) {
        self.rows.push(None);
    }

    /// Number of positions, including "no data" rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no positions at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Take ownership of the positions.
    pub fn into_vec(self) -> Vec<Option<ResultRow>> {
        self.rows
    }
}

impl From<ResultRow> for RowSet {
    fn from(row: ResultRow) -> Self {
        Self {
            rows: vec![Some(row)],
        }
    }
}

impl FromIterator<Option<ResultRow>> for RowSet {
    fn from_iter<I: IntoIterator<Item = Option<ResultRow>>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// A single-shot unit of work.
///
/// # Contract
///
/// - `execute` is called at most once and has no effect on global state.
/// - A non-empty [`last_error`](Computation::last_error) is fatal for the call,
///   even if `execute` returned `Ok`.
/// - `produce_rows` is called only after a successful `execute` and moves the
///   output out of the computation.
pub trait Computation: Send {
    /// Short name of the variant, used in logs.
    fn kind(&self) -> &'static str;

    /// Perform the unit of work.
    fn execute(&mut self) -> Result<()>;

    /// The recorded failure reason; empty means success.
    fn last_error(&self) -> &str;

    /// Hand over the produced rows.
    fn produce_rows(&mut self) -> RowSet;
}

/// The last-error slot of a computation.
#[derive(Debug, Clone, Default)]
pub struct ErrorSlot(String);

impl ErrorSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of an execute step and pass it through.
    pub fn track<T>(&mut self, outcome: Result<T>) -> Result<T> {
        match &outcome {
            Ok(_) => self.0.clear(),
            Err(e) => self.0 = e.to_string(),
        }
        outcome
    }

    /// Record a failure directly.
    pub fn set(&mut self, error: &UtilityError) {
        self.0 = error.to_string();
    }

    /// The recorded message; empty means success.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a failure has been recorded.
    pub fn is_set(&self) -> bool {
        !self.0.is_empty()
    }
}
