use log::trace;

use super::into_labels;
use super::Labeler;
use crate::algorithms::QuickXplain;
use crate::basic_types::ConstraintId;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::oracle::ConsistencyOracle;

/// The input of a single [`QuickXplain`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictParameters {
    pub consideration: ConstraintSet,
    pub background: ConstraintSet,
}

/// Labels nodes with minimal conflict sets, so a hitting-set search over them enumerates the
/// minimal diagnoses.
#[derive(Debug)]
pub struct QuickXplainLabeler<Oracle> {
    quickxplain: QuickXplain<Oracle>,
    consideration: ConstraintSet,
    background: ConstraintSet,
}

impl<Oracle: ConsistencyOracle> QuickXplainLabeler<Oracle> {
    pub fn new(oracle: Oracle, consideration: ConstraintSet, background: ConstraintSet) -> Self {
        Self {
            quickxplain: QuickXplain::new(oracle),
            consideration,
            background,
        }
    }

    pub fn oracle(&self) -> &Oracle {
        self.quickxplain.oracle()
    }
}

impl<Oracle: ConsistencyOracle> Labeler for QuickXplainLabeler<Oracle> {
    type Parameters = ConflictParameters;

    fn consideration_set(&self) -> &ConstraintSet {
        &self.consideration
    }

    fn background_set(&self) -> &ConstraintSet {
        &self.background
    }

    fn initial_parameters(&self) -> ConflictParameters {
        ConflictParameters {
            consideration: self.consideration.clone(),
            background: self.background.clone(),
        }
    }

    fn label(
        &mut self,
        parameters: &ConflictParameters,
    ) -> Result<Vec<ConstraintSet>, DiagnosisError> {
        trace!("Labelling with QuickXplain: {parameters:?}");
        self.quickxplain
            .find_conflict_set(&parameters.consideration, &parameters.background)
            .map(into_labels)
    }

    fn child_parameters(
        &self,
        parameters: &ConflictParameters,
        arc: ConstraintId,
    ) -> ConflictParameters {
        ConflictParameters {
            consideration: parameters.consideration.without(arc),
            background: parameters.background.clone(),
        }
    }

    fn dispose(&mut self) {
        self.quickxplain.oracle_mut().dispose()
    }
}

#[cfg(test)]
mod tests {
    use super::QuickXplainLabeler;
    use crate::basic_types::ConstraintSet;
    use crate::labelers::Labeler;
    use crate::test_oracle::c;
    use crate::test_oracle::set;
    use crate::test_oracle::TestOracle;

    #[test]
    fn child_parameters_remove_the_arc_from_the_consideration_set() {
        let labeler = QuickXplainLabeler::new(
            TestOracle::with_conflicts(&[&[1, 2]]),
            set(&[1, 2, 3]),
            set(&[4]),
        );

        let child = labeler.child_parameters(&labeler.initial_parameters(), c(2));

        assert_eq!(child.consideration, set(&[1, 3]));
        assert_eq!(child.background, set(&[4]));
    }

    #[test]
    fn labels_are_conflicts() {
        let mut labeler = QuickXplainLabeler::new(
            TestOracle::with_conflicts(&[&[1, 3]]),
            set(&[1, 2, 3]),
            ConstraintSet::default(),
        );
        let parameters = labeler.initial_parameters();

        let labels = labeler.label(&parameters).expect("no oracle error");

        assert_eq!(labels, vec![set(&[1, 3])]);
    }

    #[test]
    fn consistent_node_has_no_label() {
        let mut labeler = QuickXplainLabeler::new(
            TestOracle::with_conflicts(&[&[1, 3]]),
            set(&[1, 2, 3]),
            ConstraintSet::default(),
        );
        let parameters = labeler.child_parameters(&labeler.initial_parameters(), c(1));

        let labels = labeler.label(&parameters).expect("no oracle error");

        assert!(labels.is_empty());
    }
}
