use log::trace;

use super::into_labels;
use super::Labeler;
use crate::algorithms::FastDiag;
use crate::basic_types::ConstraintId;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::oracle::ConsistencyOracle;

/// The input of a single [`FastDiag`] or [`FlexDiag`](crate::algorithms::FlexDiag) call.
///
/// The constraints of `all_constraints` which are not in `consideration` act as the background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosisParameters {
    pub consideration: ConstraintSet,
    pub all_constraints: ConstraintSet,
}

/// Labels nodes with minimal diagnoses computed by [`FastDiag`], so a hitting-set search over
/// them enumerates the minimal conflicts.
#[derive(Debug)]
pub struct FastDiagLabeler<Oracle> {
    fastdiag: FastDiag<Oracle>,
    consideration: ConstraintSet,
    background: ConstraintSet,
    all_constraints: ConstraintSet,
}

impl<Oracle: ConsistencyOracle> FastDiagLabeler<Oracle> {
    /// Creates a labeler which diagnoses `consideration` against
    /// `all_constraints = background ∪ consideration`.
    pub fn new(oracle: Oracle, consideration: ConstraintSet, background: ConstraintSet) -> Self {
        let all_constraints = background.union(&consideration);
        Self {
            fastdiag: FastDiag::new(oracle),
            consideration,
            background,
            all_constraints,
        }
    }

    pub fn oracle(&self) -> &Oracle {
        self.fastdiag.oracle()
    }
}

impl<Oracle: ConsistencyOracle> Labeler for FastDiagLabeler<Oracle> {
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
        trace!("Labelling with FastDiag: {parameters:?}");
        self.fastdiag
            .find_diagnosis(&parameters.consideration, &parameters.all_constraints)
            .map(into_labels)
    }

    /// The arc stays in `all_constraints`, which turns it into a background constraint.
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

    fn dispose(&mut self) {
        self.fastdiag.oracle_mut().dispose()
    }
}
