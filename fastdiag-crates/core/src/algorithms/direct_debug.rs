use log::debug;

use super::divide_and_conquer::divide_and_conquer;
use super::fastdiag_mss::SatisfiableSubsetConvention;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::basic_types::TestCaseSet;
use crate::oracle::ConsistencyOracle;

/// Computes a minimal diagnosis of a knowledge base with respect to a set of test cases
/// (DirectDebug, Felfernig et al.).
///
/// A test case is violated by a set of constraints if the constraints together with the test case
/// are inconsistent. The diagnosis is a minimal subset `Δ` of the consideration set `C` such that
/// `(C \ Δ) ∪ B` violates none of the test cases which `C ∪ B` violates.
///
/// The oracle has to be able to evaluate test cases, otherwise the search fails with
/// [`DiagnosisError::UnsupportedMode`].
#[derive(Debug)]
pub struct DirectDebug<Oracle> {
    oracle: Oracle,
}

impl<Oracle: ConsistencyOracle> DirectDebug<Oracle> {
    pub fn new(oracle: Oracle) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut Oracle {
        &mut self.oracle
    }

    pub fn into_oracle(self) -> Oracle {
        self.oracle
    }

    /// Returns a minimal diagnosis of `consideration` with respect to `background` and
    /// `test_cases`.
    ///
    /// The result is empty, without any recursion, when `consideration` or `test_cases` is empty,
    /// when `consideration ∪ background` violates none of the test cases, or when `background` on
    /// its own already violates one of the violated test cases.
    pub fn find_diagnosis(
        &mut self,
        consideration: &ConstraintSet,
        background: &ConstraintSet,
        test_cases: &TestCaseSet,
    ) -> Result<ConstraintSet, DiagnosisError> {
        if consideration.is_empty() || test_cases.is_empty() {
            debug!("DirectDebug: nothing to debug");
            return Ok(ConstraintSet::default());
        }

        let violated = self.oracle.violated_test_cases(
            &background.union(consideration),
            test_cases,
            false,
        )?;
        if violated.is_empty() {
            debug!("DirectDebug: no test case is violated");
            return Ok(ConstraintSet::default());
        }
        debug!("DirectDebug: violated test cases {violated}");

        // With an empty background this checks whether a test case is unsatisfiable on its own.
        if !self
            .oracle
            .violated_test_cases(background, &violated, true)?
            .is_empty()
        {
            debug!("DirectDebug: the background on its own violates a test case");
            return Ok(ConstraintSet::default());
        }

        let satisfiable_subset = divide_and_conquer(
            &mut self.oracle,
            &SatisfiableSubsetConvention {
                test_cases: Some(&violated),
            },
            &ConstraintSet::default(),
            consideration,
            background,
        )?;
        let diagnosis = consideration.difference(&satisfiable_subset);

        debug!("DirectDebug: found diagnosis {diagnosis}");
        Ok(diagnosis)
    }
}

#[cfg(test)]
mod tests {
    use super::DirectDebug;
    use crate::basic_types::ConstraintSet;
    use crate::basic_types::DiagnosisError;
    use crate::basic_types::TestCaseSet;
    use crate::test_oracle::set;
    use crate::test_oracle::t;
    use crate::test_oracle::test_cases;
    use crate::test_oracle::TestOracle;

    #[test]
    fn no_violated_test_case_returns_empty_without_recursion() {
        let oracle = TestOracle::with_conflicts(&[])
            .with_test_case_conflict(t(1), &[9])
            .with_test_case_conflict(t(2), &[10]);
        let mut direct_debug = DirectDebug::new(oracle);

        let diagnosis = direct_debug
            .find_diagnosis(&set(&[1, 2, 3, 4]), &set(&[5]), &test_cases(&[1, 2]))
            .expect("no oracle error");

        assert!(diagnosis.is_empty());
        // One check per test case, nothing else.
        assert_eq!(direct_debug.oracle().num_queries(), 2);
    }

    #[test]
    fn removes_the_constraints_responsible_for_failing_test_cases() {
        let oracle = TestOracle::with_conflicts(&[])
            .with_test_case_conflict(t(1), &[2])
            .with_test_case_conflict(t(2), &[3, 4]);
        let mut direct_debug = DirectDebug::new(oracle);

        let diagnosis = direct_debug
            .find_diagnosis(
                &set(&[1, 2, 3, 4, 5, 6]),
                &ConstraintSet::default(),
                &test_cases(&[1, 2, 3]),
            )
            .expect("no oracle error");

        assert!(diagnosis.contains(crate::test_oracle::c(2)));
        assert_eq!(diagnosis.len(), 2);
        assert!(diagnosis.difference(&set(&[2])).is_subset(&set(&[3, 4])));
    }

    #[test]
    fn knowledge_base_conflicts_violate_every_test_case() {
        let oracle = TestOracle::with_conflicts(&[&[1, 4]]).supporting_test_cases();
        let mut direct_debug = DirectDebug::new(oracle);

        let diagnosis = direct_debug
            .find_diagnosis(&set(&[1, 2, 3, 4]), &set(&[5]), &test_cases(&[1]))
            .expect("no oracle error");

        assert_eq!(diagnosis.len(), 1);
        assert!(diagnosis.is_subset(&set(&[1, 4])));
    }

    #[test]
    fn background_violating_a_test_case_has_no_diagnosis() {
        let oracle = TestOracle::with_conflicts(&[]).with_test_case_conflict(t(1), &[5]);
        let mut direct_debug = DirectDebug::new(oracle);

        let diagnosis = direct_debug
            .find_diagnosis(&set(&[1, 2]), &set(&[5]), &test_cases(&[1]))
            .expect("no oracle error");

        assert!(diagnosis.is_empty());
    }

    #[test]
    fn unsatisfiable_test_case_has_no_diagnosis_with_or_without_background() {
        for background in [ConstraintSet::default(), set(&[9])] {
            let oracle = TestOracle::with_conflicts(&[]).with_test_case_conflict(t(1), &[]);
            let mut direct_debug = DirectDebug::new(oracle);

            let diagnosis = direct_debug
                .find_diagnosis(&set(&[1, 2, 3, 4]), &background, &test_cases(&[1]))
                .expect("no oracle error");

            assert!(diagnosis.is_empty(), "background {background}");
        }
    }

    #[test]
    fn empty_test_cases_do_not_query_the_oracle() {
        let mut direct_debug = DirectDebug::new(TestOracle::with_conflicts(&[&[1]]));

        let diagnosis = direct_debug
            .find_diagnosis(&set(&[1, 2]), &ConstraintSet::default(), &TestCaseSet::default())
            .expect("no oracle error");

        assert!(diagnosis.is_empty());
        assert_eq!(direct_debug.oracle().num_queries(), 0);
    }

    #[test]
    fn oracle_without_test_case_support_is_rejected() {
        let mut direct_debug = DirectDebug::new(TestOracle::with_conflicts(&[&[1]]));

        let result = direct_debug.find_diagnosis(
            &set(&[1, 2]),
            &ConstraintSet::default(),
            &test_cases(&[1]),
        );

        assert_eq!(result, Err(DiagnosisError::UnsupportedMode));
    }
}
