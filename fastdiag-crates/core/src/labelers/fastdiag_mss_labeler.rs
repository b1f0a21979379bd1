use log::trace;

use super::into_labels;
use super::Labeler;
use crate::algorithms::DirectDebug;
use crate::algorithms::FastDiagMss;
use crate::basic_types::ConstraintId;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::basic_types::TestCaseSet;
use crate::oracle::ConsistencyOracle;

/// The input of a single [`FastDiagMss`] or [`DirectDebug`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SatisfiableSubsetParameters {
    pub consideration: ConstraintSet,
    pub background: ConstraintSet,
    /// When present, the diagnoses are computed with respect to these test cases.
    pub test_cases: Option<TestCaseSet>,
}

/// Labels nodes with minimal diagnoses which are the complement of a maximal satisfiable subset.
///
/// Without test cases the labels are computed by [`FastDiagMss`]; with test cases by
/// [`DirectDebug`], in which case the labels are the diagnoses of the test cases which the
/// knowledge base violates.
#[derive(Debug)]
pub struct FastDiagMssLabeler<Oracle> {
    oracle: Oracle,
    consideration: ConstraintSet,
    background: ConstraintSet,
    test_cases: Option<TestCaseSet>,
}

impl<Oracle: ConsistencyOracle> FastDiagMssLabeler<Oracle> {
    pub fn new(oracle: Oracle, consideration: ConstraintSet, background: ConstraintSet) -> Self {
        Self {
            oracle,
            consideration,
            background,
            test_cases: None,
        }
    }

    /// Creates a labeler which diagnoses `consideration` with respect to `test_cases`.
    pub fn with_test_cases(
        oracle: Oracle,
        consideration: ConstraintSet,
        background: ConstraintSet,
        test_cases: TestCaseSet,
    ) -> Self {
        Self {
            oracle,
            consideration,
            background,
            test_cases: Some(test_cases),
        }
    }

    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }
}

impl<Oracle: ConsistencyOracle> Labeler for FastDiagMssLabeler<Oracle> {
    type Parameters = SatisfiableSubsetParameters;

    fn consideration_set(&self) -> &ConstraintSet {
        &self.consideration
    }

    fn background_set(&self) -> &ConstraintSet {
        &self.background
    }

    fn initial_parameters(&self) -> SatisfiableSubsetParameters {
        SatisfiableSubsetParameters {
            consideration: self.consideration.clone(),
            background: self.background.clone(),
            test_cases: self.test_cases.clone(),
        }
    }

    fn label(
        &mut self,
        parameters: &SatisfiableSubsetParameters,
    ) -> Result<Vec<ConstraintSet>, DiagnosisError> {
        trace!("Labelling with FastDiag (MSS): {parameters:?}");
        let diagnosis = match &parameters.test_cases {
            Some(test_cases) => DirectDebug::new(&mut self.oracle).find_diagnosis(
                &parameters.consideration,
                &parameters.background,
                test_cases,
            )?,
            None => FastDiagMss::new(&mut self.oracle)
                .find_diagnosis(&parameters.consideration, &parameters.background)?,
        };

        Ok(into_labels(diagnosis))
    }

    /// The arc moves from the consideration set into the background.
    fn child_parameters(
        &self,
        parameters: &SatisfiableSubsetParameters,
        arc: ConstraintId,
    ) -> SatisfiableSubsetParameters {
        SatisfiableSubsetParameters {
            consideration: parameters.consideration.without(arc),
            background: parameters.background.with(arc),
            test_cases: parameters.test_cases.clone(),
        }
    }

    fn dispose(&mut self) {
        self.oracle.dispose()
    }
}

#[cfg(test)]
mod tests {
    use super::FastDiagMssLabeler;
    use crate::basic_types::ConstraintSet;
    use crate::labelers::Labeler;
    use crate::test_oracle::c;
    use crate::test_oracle::set;
    use crate::test_oracle::t;
    use crate::test_oracle::test_cases;
    use crate::test_oracle::TestOracle;

    #[test]
    fn child_parameters_move_the_arc_into_the_background() {
        let labeler = FastDiagMssLabeler::new(
            TestOracle::with_conflicts(&[&[1, 2]]),
            set(&[1, 2, 3]),
            set(&[4]),
        );

        let child = labeler.child_parameters(&labeler.initial_parameters(), c(2));

        assert_eq!(child.consideration, set(&[1, 3]));
        assert_eq!(child.background, set(&[4, 2]));
    }

    #[test]
    fn labels_with_test_cases_use_direct_debug() {
        let oracle = TestOracle::with_conflicts(&[]).with_test_case_conflict(t(1), &[2]);
        let mut labeler = FastDiagMssLabeler::with_test_cases(
            oracle,
            set(&[1, 2, 3]),
            ConstraintSet::default(),
            test_cases(&[1]),
        );
        let parameters = labeler.initial_parameters();

        let labels = labeler.label(&parameters).expect("no oracle error");

        assert_eq!(labels, vec![set(&[2])]);
    }

    #[test]
    fn test_cases_need_a_test_case_aware_oracle() {
        let mut labeler = FastDiagMssLabeler::with_test_cases(
            TestOracle::with_conflicts(&[&[1]]),
            set(&[1, 2]),
            ConstraintSet::default(),
            test_cases(&[1]),
        );
        let parameters = labeler.initial_parameters();

        assert!(labeler.label(&parameters).is_err());
        assert_eq!(labeler.oracle().num_queries(), 0);
    }
}
