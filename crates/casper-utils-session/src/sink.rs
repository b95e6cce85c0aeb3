//! Delivery of session rows into host-native tuples.

use casper_utils_core::ResultRow;

use crate::error::Result;
use crate::session::{CallSession, Step};

/// Receives the rows of one call, in production order.
pub trait RowSink {
    /// Accept one row.
    fn accept(&mut self, row: ResultRow);

    /// Accept a "no data" position. Ignored by default.
    fn accept_null(&mut self) {}
}

impl RowSink for Vec<ResultRow> {
    fn accept(&mut self, row: ResultRow) {
        self.push(row);
    }
}

impl RowSink for Vec<Option<ResultRow>> {
    fn accept(&mut self, row: ResultRow) {
        self.push(Some(row));
    }

    fn accept_null(&mut self) {
        self.push(None);
    }
}

/// Re-enter a session until it is done, feeding every position to `sink`.
///
/// Returns the number of positions delivered. On failure nothing further is
/// delivered and the session is left in its terminal state.
pub fn run_to_completion(session: &mut CallSession, sink: &mut dyn RowSink) -> Result<usize> {
    let mut delivered = 0;
    loop {
        match session.enter()? {
            Step::Row(row) => sink.accept(row),
            Step::Null => sink.accept_null(),
            Step::Done => return Ok(delivered),
        }
        delivered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casper_utils_core::{Computation, RowSet, UtilityError};

    struct Fixed(RowSet);

    impl Computation for Fixed {
        fn kind(&self) -> &'static str {
            "fixed"
        }
        fn execute(&mut self) -> casper_utils_core::Result<()> {
            Ok(())
        }
        fn last_error(&self) -> &str {
            ""
        }
        fn produce_rows(&mut self) -> RowSet {
            std::mem::take(&mut self.0)
        }
    }

    fn session(rows: RowSet) -> CallSession {
        CallSession::new(move || Ok(Box::new(Fixed(rows)) as Box<dyn Computation>))
    }

    #[test]
    fn test_run_collects_rows_in_order() {
        let rows: RowSet = ["x", "y"]
            .into_iter()
            .map(|v| Some(ResultRow::single(v)))
            .collect();
        let mut session = session(rows);
        let mut sink: Vec<ResultRow> = Vec::new();

        assert_eq!(run_to_completion(&mut session, &mut sink).unwrap(), 2);
        assert_eq!(sink, vec![ResultRow::single("x"), ResultRow::single("y")]);
        assert_eq!(session.calls(), 3);
    }

    #[test]
    fn test_run_keeps_null_positions() {
        let rows: RowSet = vec![None, Some(ResultRow::single("y"))].into_iter().collect();
        let mut session = session(rows);
        let mut sink: Vec<Option<ResultRow>> = Vec::new();

        assert_eq!(run_to_completion(&mut session, &mut sink).unwrap(), 2);
        assert_eq!(sink, vec![None, Some(ResultRow::single("y"))]);
    }

    #[test]
    fn test_run_delivers_nothing_on_failure() {
        let mut session = CallSession::new(|| Err(UtilityError::Format("bad claims".into())));
        let mut sink: Vec<ResultRow> = Vec::new();

        assert!(run_to_completion(&mut session, &mut sink).is_err());
        assert!(sink.is_empty());
    }
}
