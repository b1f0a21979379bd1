use std::num::NonZero;

use log::debug;

use super::divide_and_conquer::divide_and_conquer;
use super::divide_and_conquer::BackgroundConvention;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::fastdiag_assert_simple;
use crate::oracle::is_consistent_or_empty;
use crate::oracle::ConsistencyOracle;

/// Computes a minimal diagnosis with FastDiag (Felfernig et al., 2012), relative to the set of
/// all constraints `AC = B ∪ C`.
///
/// A diagnosis is a subset `Δ` of the consideration set `C` such that `AC \ Δ` is consistent, and
/// no proper subset of `Δ` has that property. The background is never passed explicitly: it is
/// `AC \ C`.
///
/// See [`FastDiagMss`](super::FastDiagMss) for the variant which is given the background instead
/// of `AC`.
#[derive(Debug)]
pub struct FastDiag<Oracle> {
    oracle: Oracle,
}

impl<Oracle: ConsistencyOracle> FastDiag<Oracle> {
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

    /// Returns a minimal diagnosis of `consideration`, which has to be a subset of
    /// `all_constraints`.
    ///
    /// The result is empty if no diagnosis is needed or possible: when `consideration` is empty,
    /// when `all_constraints` is consistent, or when the background `all_constraints \
    /// consideration` is inconsistent on its own.
    pub fn find_diagnosis(
        &mut self,
        consideration: &ConstraintSet,
        all_constraints: &ConstraintSet,
    ) -> Result<ConstraintSet, DiagnosisError> {
        find_bounded_diagnosis(
            &mut self.oracle,
            consideration,
            all_constraints,
            NonZero::<usize>::MIN,
            "FastDiag",
        )
    }
}

/// The outer guard and recursion shared by [`FastDiag`] and [`FlexDiag`](super::FlexDiag); a
/// `leaf_size` of one gives an exact (minimal) diagnosis.
pub(crate) fn find_bounded_diagnosis<Oracle: ConsistencyOracle + ?Sized>(
    oracle: &mut Oracle,
    consideration: &ConstraintSet,
    all_constraints: &ConstraintSet,
    leaf_size: NonZero<usize>,
    algorithm: &str,
) -> Result<ConstraintSet, DiagnosisError> {
    fastdiag_assert_simple!(
        consideration.is_subset(all_constraints),
        "the consideration set has to be a subset of all constraints"
    );

    if consideration.is_empty() {
        debug!("{algorithm}: the consideration set is empty");
        return Ok(ConstraintSet::default());
    }

    if oracle.is_consistent(all_constraints)? {
        debug!("{algorithm}: the knowledge base is consistent, no diagnosis is needed");
        return Ok(ConstraintSet::default());
    }

    if !is_consistent_or_empty(oracle, &all_constraints.difference(consideration))? {
        debug!("{algorithm}: the background is inconsistent on its own, no diagnosis exists");
        return Ok(ConstraintSet::default());
    }

    let diagnosis = divide_and_conquer(
        oracle,
        &AllConstraintsConvention { leaf_size },
        &ConstraintSet::default(),
        consideration,
        all_constraints,
    )?;

    debug!("{algorithm}: found diagnosis {diagnosis}");
    Ok(diagnosis)
}

/// `fd(D, C, AC)`: the explored half is searched with the unexplored half removed from `AC`, and
/// the unexplored half with the first result removed.
#[derive(Clone, Copy, Debug)]
struct AllConstraintsConvention {
    leaf_size: NonZero<usize>,
}

impl BackgroundConvention for AllConstraintsConvention {
    fn explores_second_half_first(&self) -> bool {
        false
    }

    fn is_settled<Oracle: ConsistencyOracle + ?Sized>(
        &self,
        oracle: &mut Oracle,
        _candidates: &ConstraintSet,
        all_constraints: &ConstraintSet,
    ) -> Result<bool, DiagnosisError> {
        is_consistent_or_empty(oracle, all_constraints)
    }

    fn settled_result(&self, _candidates: &ConstraintSet) -> ConstraintSet {
        ConstraintSet::default()
    }

    fn is_leaf(&self, candidates: &ConstraintSet) -> bool {
        candidates.len() <= self.leaf_size.get()
    }

    fn leaf_result(&self, candidates: &ConstraintSet) -> ConstraintSet {
        candidates.clone()
    }

    fn first_background(
        &self,
        all_constraints: &ConstraintSet,
        unexplored: &ConstraintSet,
    ) -> ConstraintSet {
        all_constraints.difference(unexplored)
    }

    fn second_delta(
        &self,
        _explored: &ConstraintSet,
        first_result: &ConstraintSet,
    ) -> ConstraintSet {
        first_result.clone()
    }

    fn second_background(
        &self,
        all_constraints: &ConstraintSet,
        first_result: &ConstraintSet,
    ) -> ConstraintSet {
        all_constraints.difference(first_result)
    }
}
