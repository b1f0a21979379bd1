//! A [`TerminationCondition`] is a condition which is polled by the hitting-set engine between
//! the processing of two nodes. It indicates when the engine should stop, even if not all
//! diagnoses have been found. The most common example would be [`TimeBudget`], which gives the
//! engine a certain time budget to complete its search.
//!
//! A condition is never polled while a consistency check is running; a check which has started
//! always runs to completion.

mod combinator;
mod indefinite;
mod time_budget;

pub use combinator::*;
pub use indefinite::*;
pub use time_budget::*;

/// The central trait that defines a termination condition. A termination condition determines when
/// the engine should give up searching for further diagnoses.
pub trait TerminationCondition {
    /// Returns `true` when the engine should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }
}
