use thiserror::Error;

#[cfg(doc)]
use crate::oracle::ConsistencyOracle;

/// Errors which abort a diagnosis or conflict search.
///
/// None of these are recovered from inside the algorithms: a failed consistency check means the
/// result of the whole search is unknown, so the error is returned to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosisError {
    /// A set which needs at least one element was empty, e.g. a consistency check of zero
    /// constraints.
    #[error("expected at least one {0}, but the provided set was empty")]
    EmptyInput(&'static str),
    /// A test case was given to an oracle which was not built to evaluate test cases.
    #[error("the consistency oracle was not configured to evaluate test cases")]
    UnsupportedMode,
    /// The oracle was used after [`ConsistencyOracle::dispose`] was called.
    #[error("the consistency oracle has been disposed")]
    OracleDisposed,
    /// The oracle could not decide whether the constraints are consistent.
    #[error("the consistency oracle failed, more details: {0}")]
    Oracle(String),
}
