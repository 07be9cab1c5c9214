//! Job and batch outcome types.
//!
//! Every handler invocation resolves to a [`JobOutcome`] value; expected
//! failures (validation, filtered recipients, exhausted retries) are data,
//! not propagated errors. Only truly unexpected panics cross the handler
//! boundary, and those are caught by the dispatcher.

/// Boxed error carried alongside a failure reason for logging.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of processing a single job.
#[derive(Debug)]
pub enum JobOutcome {
    Success,
    Failure {
        /// Human-readable description of what went wrong.
        reason: String,
        /// Underlying collaborator error, when one exists.
        source: Option<BoxedError>,
    },
}

impl JobOutcome {
    /// Creates a failure outcome without an underlying error.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
            source: None,
        }
    }

    /// Creates a failure outcome carrying the collaborator error that caused it.
    pub fn failure_with(reason: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        Self::Failure {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Success)
    }

    /// Returns the failure reason, if this outcome is a failure.
    pub fn reason(&self) -> Option<&str> {
        match self {
            JobOutcome::Success => None,
            JobOutcome::Failure { reason, .. } => Some(reason),
        }
    }
}

/// Per-recipient outcome inside a bulk send.
#[derive(Debug)]
pub struct SendReport {
    pub recipient: String,
    pub outcome: JobOutcome,
}

/// Aggregate classification of a bulk send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkStatus {
    AllSucceeded,
    AllFailed,
    Partial,
}

/// Result of a bulk email send: one report per input request, in input order.
///
/// One item's failure never aborts the remaining items, so the report always
/// contains exactly as many entries as the request had recipients.
#[derive(Debug, Default)]
pub struct BulkReport {
    pub results: Vec<SendReport>,
}

impl BulkReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Classifies the batch. An empty report counts as fully succeeded.
    pub fn status(&self) -> BulkStatus {
        let failed = self.failed();
        if failed == 0 {
            BulkStatus::AllSucceeded
        } else if failed == self.results.len() {
            BulkStatus::AllFailed
        } else {
            BulkStatus::Partial
        }
    }
}
