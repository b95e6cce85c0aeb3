//! The call session state machine.
//!
//! A host invokes a computation by re-entering the same [`CallSession`] until
//! it reports [`Step::Done`]. The first entry constructs and executes the
//! computation; every entry, including the first, then delivers at most one
//! row.
//!
//! ```text
//! Uninitialized ──> Executing ──> Streaming ──> Done
//!                       │
//!                       └──────> Failed
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use casper_utils_core::{Computation, ResultRow, RowSet};
use tracing::Span;

use crate::error::{Result, SessionError};

/// Builds the computation a session drives.
pub type ComputationFactory =
    Box<dyn FnOnce() -> casper_utils_core::Result<Box<dyn Computation>> + Send>;

/// Lifecycle of a call session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Created; the factory has not run.
    Uninitialized,
    /// The computation is being constructed and executed.
    Executing,
    /// Rows are being delivered.
    Streaming,
    /// Every row was delivered. Terminal.
    Done,
    /// Construction or execution failed. Terminal.
    Failed,
}

impl SessionState {
    /// Whether no further entries are accepted.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Done | SessionState::Failed)
    }
}

/// Outcome of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The row at the current position.
    Row(ResultRow),
    /// A "no data" position: counts toward the bound, yields no tuple.
    Null,
    /// All positions were delivered.
    Done,
}

/// One logical invocation of a computation.
///
/// The host owns the session and passes it back on every entry. Sessions
/// share nothing with each other.
pub struct CallSession {
    state: SessionState,
    factory: Option<ComputationFactory>,
    rows: std::vec::IntoIter<Option<ResultRow>>,
    cursor: usize,
    bound: usize,
    calls: u64,
    span: Span,
}

impl CallSession {
    /// Create a session around a computation factory.
    ///
    /// The factory runs on the first entry, never more than once.
    pub fn new<F>(factory: F) -> Self
    where
        F: FnOnce() -> casper_utils_core::Result<Box<dyn Computation>> + Send + 'static,
    {
        Self {
            state: SessionState::Uninitialized,
            factory: Some(Box::new(factory)),
            rows: Vec::new().into_iter(),
            cursor: 0,
            bound: 0,
            calls: 0,
            span: tracing::debug_span!("call_session", kind = tracing::field::Empty),
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of positions delivered so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of positions, fixed once execution succeeds.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Number of entries so far, including rejected ones.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Enter the session once.
    ///
    /// Returns the next row, a "no data" marker, or [`Step::Done`]. A failed
    /// execution is reported once as an error; every entry after `Done` or
    /// `Failed` returns [`SessionError::Finished`].
    pub fn enter(&mut self) -> Result<Step> {
        let span = self.span.clone();
        let _entered = span.enter();

        self.calls += 1;
        tracing::debug!(call = self.calls, state = ?self.state, "entering call session");

        match self.state {
            SessionState::Uninitialized => {
                self.start()?;
                Ok(self.advance())
            }
            SessionState::Streaming => Ok(self.advance()),
            state @ (SessionState::Executing | SessionState::Done | SessionState::Failed) => {
                Err(SessionError::Finished { state })
            }
        }
    }

    fn start(&mut self) -> Result<()> {
        self.state = SessionState::Executing;

        let Some(factory) = self.factory.take() else {
            self.state = SessionState::Failed;
            return Err(SessionError::Finished {
                state: SessionState::Executing,
            });
        };

        let span = self.span.clone();
        let outcome = panic::catch_unwind(AssertUnwindSafe(move || run(factory, &span)))
            .unwrap_or_else(|payload| Err(SessionError::Panicked(panic_message(payload))));

        match outcome {
            Ok(rows) => {
                self.bound = rows.len();
                self.rows = rows.into_vec().into_iter();
                self.state = SessionState::Streaming;
                Ok(())
            }
            Err(error) => {
                self.state = SessionState::Failed;
                tracing::warn!(%error, "call session failed");
                Err(error)
            }
        }
    }

    fn advance(&mut self) -> Step {
        if self.cursor < self.bound {
            self.cursor += 1;
            return match self.rows.next() {
                Some(Some(row)) => Step::Row(row),
                Some(None) | None => Step::Null,
            };
        }

        self.rows = Vec::new().into_iter();
        self.state = SessionState::Done;
        tracing::debug!(call = self.calls, rows = self.bound, "call session done");
        Step::Done
    }
}

impl fmt::Debug for CallSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallSession")
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("bound", &self.bound)
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}

// The computation is dropped before this returns, on every path.
fn run(factory: ComputationFactory, span: &Span) -> Result<RowSet> {
    let mut computation = factory()?;
    let kind = computation.kind();
    span.record("kind", kind);

    computation.execute()?;
    let message = computation.last_error();
    if !message.is_empty() {
        return Err(SessionError::Reported {
            kind,
            message: message.to_string(),
        });
    }
    Ok(computation.produce_rows())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casper_utils_core::{ErrorKind, UtilityError};

    /// A computation with scripted behavior.
    struct Scripted {
        rows: Vec<Option<&'static str>>,
        fail: Option<UtilityError>,
        report: Option<&'static str>,
    }

    impl Scripted {
        fn rows(rows: Vec<Option<&'static str>>) -> Self {
            Self {
                rows,
                fail: None,
                report: None,
            }
        }
    }

    impl Computation for Scripted {
        fn kind(&self) -> &'static str {
            "scripted"
        }

        fn execute(&mut self) -> casper_utils_core::Result<()> {
            match self.fail.take() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        fn last_error(&self) -> &str {
            self.report.unwrap_or("")
        }

        fn produce_rows(&mut self) -> RowSet {
            self.rows
                .drain(..)
                .map(|row| row.map(ResultRow::single))
                .collect()
        }
    }

    fn session(computation: Scripted) -> CallSession {
        CallSession::new(move || Ok(Box::new(computation) as Box<dyn Computation>))
    }

    #[test]
    fn test_three_rows_then_done() {
        let mut session = session(Scripted::rows(vec![Some("a"), Some("b"), Some("c")]));

        assert_eq!(session.enter().unwrap(), Step::Row(ResultRow::single("a")));
        assert_eq!(session.state(), SessionState::Streaming);
        assert_eq!(session.bound(), 3);
        assert_eq!(session.enter().unwrap(), Step::Row(ResultRow::single("b")));
        assert_eq!(session.enter().unwrap(), Step::Row(ResultRow::single("c")));
        assert_eq!(session.cursor(), 3);
        assert_eq!(session.enter().unwrap(), Step::Done);
        assert_eq!(session.state(), SessionState::Done);
        assert_eq!(session.calls(), 4);
    }

    #[test]
    fn test_zero_rows_is_done_on_first_entry() {
        let mut session = session(Scripted::rows(vec![]));
        assert_eq!(session.enter().unwrap(), Step::Done);
        assert_eq!(session.bound(), 0);
        assert_eq!(session.state(), SessionState::Done);
    }

    #[test]
    fn test_null_row_counts_toward_bound() {
        let mut session = session(Scripted::rows(vec![Some("a"), None, Some("c")]));
        assert_eq!(session.enter().unwrap(), Step::Row(ResultRow::single("a")));
        assert_eq!(session.enter().unwrap(), Step::Null);
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.enter().unwrap(), Step::Row(ResultRow::single("c")));
        assert_eq!(session.enter().unwrap(), Step::Done);
    }

    #[test]
    fn test_reentry_after_done_is_rejected() {
        let mut session = session(Scripted::rows(vec![Some("a")]));
        session.enter().unwrap();
        session.enter().unwrap();
        let err = session.enter().unwrap_err();
        assert_eq!(
            err,
            SessionError::Finished {
                state: SessionState::Done
            }
        );
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_execute_failure() {
        let mut computation = Scripted::rows(vec![Some("a")]);
        computation.fail = Some(UtilityError::KeyMaterial("no key".into()));
        let mut session = session(computation);

        let err = session.enter().unwrap_err();
        assert_eq!(err, SessionError::Failed(UtilityError::KeyMaterial("no key".into())));
        assert_eq!(err.to_string(), "key material error: no key");
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(session.bound(), 0);

        assert!(matches!(
            session.enter(),
            Err(SessionError::Finished {
                state: SessionState::Failed
            })
        ));
    }

    #[test]
    fn test_reported_error_is_fatal() {
        let mut computation = Scripted::rows(vec![Some("a")]);
        computation.report = Some("late failure");
        let mut session = session(computation);

        let err = session.enter().unwrap_err();
        assert_eq!(err.to_string(), "scripted: late failure");
        assert_eq!(session.state(), SessionState::Failed);
    }

    #[test]
    fn test_factory_failure() {
        let mut session = CallSession::new(|| Err(UtilityError::Argument("missing key".into())));
        match session.enter() {
            Err(SessionError::Failed(e)) => assert_eq!(e.kind(), ErrorKind::Argument),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(session.state(), SessionState::Failed);
    }

    #[test]
    fn test_factory_runs_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let mut session = CallSession::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(UtilityError::Format("bad".into()))
        });

        assert!(session.enter().is_err());
        assert!(session.enter().is_err());
        assert!(session.enter().is_err());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panic_is_caught() {
        struct Panics;
        impl Computation for Panics {
            fn kind(&self) -> &'static str {
                "panics"
            }
            fn execute(&mut self) -> casper_utils_core::Result<()> {
                panic!("boom");
            }
            fn last_error(&self) -> &str {
                ""
            }
            fn produce_rows(&mut self) -> RowSet {
                RowSet::new()
            }
        }

        let mut session = CallSession::new(|| Ok(Box::new(Panics) as Box<dyn Computation>));
        assert_eq!(
            session.enter().unwrap_err(),
            SessionError::Panicked("boom".into())
        );
        assert_eq!(session.state(), SessionState::Failed);
    }

    #[test]
    fn test_sessions_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<CallSession>();
    }
}
