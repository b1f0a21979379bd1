use std::num::NonZero;

use log::trace;

use super::into_labels;
use super::DiagnosisParameters;
use super::Labeler;
use crate::algorithms::FlexDiag;
use crate::basic_types::ConstraintId;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::oracle::ConsistencyOracle;

/// Labels nodes with the diagnoses computed by [`FlexDiag`].
///
/// For `m > 1` the labels are not necessarily minimal, so neither are the conflicts found by a
/// hitting-set search over them.
#[derive(Debug)]
pub struct FlexDiagLabeler<Oracle> {
    flexdiag: FlexDiag<Oracle>,
    consideration: ConstraintSet,
    background: ConstraintSet,
    all_constraints: ConstraintSet,
}

impl<Oracle: ConsistencyOracle> FlexDiagLabeler<Oracle> {
    pub fn new(
        oracle: Oracle,
        consideration: ConstraintSet,
        background: ConstraintSet,
        m: NonZero<usize>,
    ) -> Self {
        let all_constraints = background.union(&consideration);
        Self {
            flexdiag: FlexDiag::new(oracle, m),
            consideration,
            background,
            all_constraints,
        }
    }

    pub fn m(&self) -> NonZero<usize> {
        self.flexdiag.m()
    }

    pub fn oracle(&self) -> &Oracle {
        self.flexdiag.oracle()
    }
}

impl<Oracle: ConsistencyOracle> Labeler for FlexDiagLabeler<Oracle> {
    type Parameters = DiagnosisParameters;

    fn consideration_set(&self) -> &ConstraintSet {
        &self.consideration
    }

    fn background_set(&self) -> &ConstraintSet {
        &self.background
    }

    fn initial_parameters(&self) -> DiagnosisParameters {
        DiagnosisParameters {
            consideration: self.consideration.clone(),
            all_constraints: self.all_constraints.clone(),
        }
    }

    fn label(
        &mut self,
        parameters: &DiagnosisParameters,
    ) -> Result<Vec<ConstraintSet>, DiagnosisError> {
        trace!("Labelling with FlexDiag (m = {}): {parameters:?}", self.m());
        self.flexdiag
            .find_diagnosis(&parameters.consideration, &parameters.all_constraints)
            .map(into_labels)
    }

    fn child_parameters(
        &self,
        parameters: &DiagnosisParameters,
        arc: ConstraintId,
    ) -> DiagnosisParameters {
        DiagnosisParameters {
            consideration: parameters.consideration.without(arc),
            all_constraints: parameters.all_constraints.clone(),
        }
    }

    fn is_minimal(&self) -> bool {
        self.m().get() == 1
    }

    fn dispose(&mut self) {
        self.flexdiag.oracle_mut().dispose()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use super::FlexDiagLabeler;
    use crate::basic_types::ConstraintSet;
    use crate::labelers::Labeler;
    use crate::test_oracle::set;
    use crate::test_oracle::TestOracle;

    #[test]
    fn minimality_depends_on_m() {
        let exact = FlexDiagLabeler::new(
            TestOracle::with_conflicts(&[&[1]]),
            set(&[1, 2]),
            ConstraintSet::default(),
            NonZero::new(1).expect("non-zero"),
        );
        let bounded = FlexDiagLabeler::new(
            TestOracle::with_conflicts(&[&[1]]),
            set(&[1, 2]),
            ConstraintSet::default(),
            NonZero::new(2).expect("non-zero"),
        );

        assert!(exact.is_minimal());
        assert!(!bounded.is_minimal());
    }

    #[test]
    fn large_m_labels_with_the_whole_consideration_set() {
        let mut labeler = FlexDiagLabeler::new(
            TestOracle::with_conflicts(&[&[1, 4]]),
            set(&[1, 2, 3, 4]),
            ConstraintSet::default(),
            NonZero::new(4).expect("non-zero"),
        );
        let parameters = labeler.initial_parameters();

        let labels = labeler.label(&parameters).expect("no oracle error");

        assert_eq!(labels, vec![set(&[1, 2, 3, 4])]);
    }
}
