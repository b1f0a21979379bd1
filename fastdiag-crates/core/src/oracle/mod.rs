//! The interface through which the diagnosis algorithms ask whether a set of constraints is
//! satisfiable.
//!
//! The algorithms never solve constraints themselves; all they know about a constraint is its
//! [`ConstraintId`]. An implementation of [`ConsistencyOracle`] maps these ids to whatever the
//! backing solver understands.
mod monitored_oracle;

pub use monitored_oracle::*;

use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::basic_types::TestCaseId;
use crate::basic_types::TestCaseSet;
#[cfg(doc)]
use crate::basic_types::ConstraintId;

/// Decides whether a finite set of constraints is jointly satisfiable.
///
/// Every check has to leave the oracle in the state it was in before the check (conceptually a
/// push, evaluate, pop), so that consecutive checks are independent of each other: checking the
/// same set twice in a row always gives the same answer.
pub trait ConsistencyOracle {
    /// Returns whether `constraints` are satisfiable together.
    ///
    /// Fails with [`DiagnosisError::EmptyInput`] when `constraints` is empty.
    fn is_consistent(&mut self, constraints: &ConstraintSet) -> Result<bool, DiagnosisError>;

    /// Returns whether `constraints` are satisfiable together with `test_case`.
    ///
    /// `constraints` may be empty, in which case the test case is checked on its own.
    ///
    /// Fails with [`DiagnosisError::UnsupportedMode`] when the oracle was not set up to evaluate
    /// test cases.
    fn is_consistent_with_test_case(
        &mut self,
        constraints: &ConstraintSet,
        test_case: TestCaseId,
    ) -> Result<bool, DiagnosisError>;

    /// Returns the test cases of `test_cases` which are violated by `constraints`, i.e. those for
    /// which `constraints` together with the test case are unsatisfiable.
    ///
    /// If `stop_at_first` is true the search stops at the first violated test case, in which case
    /// the returned set may be incomplete; it is only empty if no test case is violated.
    fn violated_test_cases(
        &mut self,
        constraints: &ConstraintSet,
        test_cases: &TestCaseSet,
        stop_at_first: bool,
    ) -> Result<TestCaseSet, DiagnosisError> {
        if test_cases.is_empty() {
            return Err(DiagnosisError::EmptyInput("test case"));
        }

        let mut violated = TestCaseSet::default();
        for test_case in test_cases {
            if !self.is_consistent_with_test_case(constraints, test_case)? {
                let _ = violated.insert(test_case);

                if stop_at_first {
                    break;
                }
            }
        }

        Ok(violated)
    }

    /// Restores the oracle to its baseline, without any temporary constraints. Calling it more
    /// than once has no further effect.
    fn reset(&mut self);

    /// Releases the resources of the oracle. Any check after this call fails with
    /// [`DiagnosisError::OracleDisposed`].
    fn dispose(&mut self);
}

impl<Oracle: ConsistencyOracle + ?Sized> ConsistencyOracle for &mut Oracle {
    fn is_consistent(&mut self, constraints: &ConstraintSet) -> Result<bool, DiagnosisError> {
        (**self).is_consistent(constraints)
    }

    fn is_consistent_with_test_case(
        &mut self,
        constraints: &ConstraintSet,
        test_case: TestCaseId,
    ) -> Result<bool, DiagnosisError> {
        (**self).is_consistent_with_test_case(constraints, test_case)
    }

    fn violated_test_cases(
        &mut self,
        constraints: &ConstraintSet,
        test_cases: &TestCaseSet,
        stop_at_first: bool,
    ) -> Result<TestCaseSet, DiagnosisError> {
        (**self).violated_test_cases(constraints, test_cases, stop_at_first)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}

impl<Oracle: ConsistencyOracle + ?Sized> ConsistencyOracle for Box<Oracle> {
    fn is_consistent(&mut self, constraints: &ConstraintSet) -> Result<bool, DiagnosisError> {
        (**self).is_consistent(constraints)
    }

    fn is_consistent_with_test_case(
        &mut self,
        constraints: &ConstraintSet,
        test_case: TestCaseId,
    ) -> Result<bool, DiagnosisError> {
        (**self).is_consistent_with_test_case(constraints, test_case)
    }

    fn violated_test_cases(
        &mut self,
        constraints: &ConstraintSet,
        test_cases: &TestCaseSet,
        stop_at_first: bool,
    ) -> Result<TestCaseSet, DiagnosisError> {
        (**self).violated_test_cases(constraints, test_cases, stop_at_first)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}

/// Checks `constraints` for consistency, treating the empty set as trivially consistent instead of
/// asking the oracle (which would reject it).
pub(crate) fn is_consistent_or_empty<Oracle: ConsistencyOracle + ?Sized>(
    oracle: &mut Oracle,
    constraints: &ConstraintSet,
) -> Result<bool, DiagnosisError> {
    if constraints.is_empty() {
        Ok(true)
    } else {
        oracle.is_consistent(constraints)
    }
}
