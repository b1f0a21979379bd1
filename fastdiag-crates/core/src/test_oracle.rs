//! This module exposes helpers that aid testing of the diagnosis algorithms and the hitting-set
//! engine without a real constraint solver.
#![cfg(test)]

use crate::basic_types::ConstraintId;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::basic_types::TestCaseId;
use crate::basic_types::TestCaseSet;
use crate::containers::StorageKey;
use crate::oracle::ConsistencyOracle;

/// The constraint which is displayed as `c{number}`.
pub(crate) fn c(number: u32) -> ConstraintId {
    ConstraintId::create_from_index(number as usize - 1)
}

/// The test case which is displayed as `t{number}`.
pub(crate) fn t(number: u32) -> TestCaseId {
    TestCaseId::create_from_index(number as usize - 1)
}

/// The set `{c{n} | n ∈ numbers}`, in the given order.
pub(crate) fn set(numbers: &[u32]) -> ConstraintSet {
    numbers.iter().map(|&number| c(number)).collect()
}

/// A knowledge base which is described by its minimal conflicts: a set of constraints is
/// inconsistent if and only if it contains one of them.
///
/// A test case is described in the same way, by the sets of constraints it is inconsistent with.
/// Every query is recorded, so tests can check how often (and with what) the oracle was called.
#[derive(Debug, Default)]
pub(crate) struct TestOracle {
    conflicts: Vec<ConstraintSet>,
    test_case_conflicts: Vec<(TestCaseId, ConstraintSet)>,
    supports_test_cases: bool,
    disposed: bool,
    queries: Vec<ConstraintSet>,
}

impl TestOracle {
    pub(crate) fn with_conflicts(conflicts: &[&[u32]]) -> Self {
        Self {
            conflicts: conflicts.iter().map(|conflict| set(conflict)).collect(),
            ..Default::default()
        }
    }

    /// Declares that `test_case` cannot be satisfied together with all of `constraints`.
    pub(crate) fn with_test_case_conflict(
        mut self,
        test_case: TestCaseId,
        constraints: &[u32],
    ) -> Self {
        self.supports_test_cases = true;
        self.test_case_conflicts.push((test_case, set(constraints)));
        self
    }

    pub(crate) fn supporting_test_cases(mut self) -> Self {
        self.supports_test_cases = true;
        self
    }

    pub(crate) fn num_queries(&self) -> usize {
        self.queries.len()
    }

    pub(crate) fn queries(&self) -> &[ConstraintSet] {
        &self.queries
    }

    fn contains_conflict(&self, constraints: &ConstraintSet) -> bool {
        self.conflicts
            .iter()
            .any(|conflict| conflict.is_subset(constraints))
    }

    fn check_usable(&self) -> Result<(), DiagnosisError> {
        if self.disposed {
            return Err(DiagnosisError::OracleDisposed);
        }
        Ok(())
    }
}

impl ConsistencyOracle for TestOracle {
    fn is_consistent(&mut self, constraints: &ConstraintSet) -> Result<bool, DiagnosisError> {
        self.check_usable()?;
        if constraints.is_empty() {
            return Err(DiagnosisError::EmptyInput("constraint"));
        }
        self.queries.push(constraints.clone());

        Ok(!self.contains_conflict(constraints))
    }

    fn is_consistent_with_test_case(
        &mut self,
        constraints: &ConstraintSet,
        test_case: TestCaseId,
    ) -> Result<bool, DiagnosisError> {
        self.check_usable()?;
        if !self.supports_test_cases {
            return Err(DiagnosisError::UnsupportedMode);
        }
        self.queries.push(constraints.clone());

        let violates_test_case = self
            .test_case_conflicts
            .iter()
            .any(|(id, conflict)| *id == test_case && conflict.is_subset(constraints));

        Ok(!violates_test_case && !self.contains_conflict(constraints))
    }

    fn reset(&mut self) {}

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

/// Returns whether `constraints` restore consistency when `diagnosis` is removed from them,
/// according to a fresh oracle built from `conflicts`.
pub(crate) fn is_consistent_without(
    conflicts: &[&[u32]],
    constraints: &ConstraintSet,
    diagnosis: &ConstraintSet,
) -> bool {
    let remainder = constraints.difference(diagnosis);
    remainder.is_empty()
        || TestOracle::with_conflicts(conflicts)
            .is_consistent(&remainder)
            .expect("non-empty input")
}

pub(crate) fn test_cases(numbers: &[u32]) -> TestCaseSet {
    numbers.iter().map(|&number| t(number)).collect()
}
