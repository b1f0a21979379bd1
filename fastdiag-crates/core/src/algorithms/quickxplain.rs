use log::debug;

use super::divide_and_conquer::divide_and_conquer;
use super::divide_and_conquer::BackgroundConvention;
use crate::basic_types::ConstraintSet;
use crate::asserts::FASTDIAG_ASSERT_ADVANCED;
use crate::asserts::FASTDIAG_ASSERT_LEVEL_DEFINITION;
use crate::basic_types::DiagnosisError;
use crate::fastdiag_assert_advanced;
use crate::oracle::is_consistent_or_empty;
use crate::oracle::ConsistencyOracle;

/// Computes a minimal conflict set with QuickXplain (Junker, 2004).
///
/// A conflict set is a subset `CS` of the consideration set `C` such that `CS ∪ B` is
/// inconsistent, and no proper subset of `CS` has that property.
///
/// # Example
/// ```rust
/// # use fastdiag_core::algorithms::QuickXplain;
/// # use fastdiag_core::ConstraintSet;
/// # fn example(oracle: impl fastdiag_core::oracle::ConsistencyOracle, c: ConstraintSet) {
/// let mut quickxplain = QuickXplain::new(oracle);
/// let conflict = quickxplain
///     .find_conflict_set(&c, &ConstraintSet::default())
///     .expect("the oracle did not fail");
/// # }
/// ```
#[derive(Debug)]
pub struct QuickXplain<Oracle> {
    oracle: Oracle,
}

impl<Oracle: ConsistencyOracle> QuickXplain<Oracle> {
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

    /// Returns a minimal conflict set of `consideration` with respect to `background`.
    ///
    /// The result is empty if there is no conflict to find, i.e. when `consideration` is empty,
    /// when `consideration ∪ background` is consistent, or when `background` on its own is already
    /// inconsistent.
    pub fn find_conflict_set(
        &mut self,
        consideration: &ConstraintSet,
        background: &ConstraintSet,
    ) -> Result<ConstraintSet, DiagnosisError> {
        if consideration.is_empty() {
            debug!("QuickXplain: the consideration set is empty");
            return Ok(ConstraintSet::default());
        }

        if self.oracle.is_consistent(&background.union(consideration))? {
            debug!("QuickXplain: the knowledge base is consistent, no conflict exists");
            return Ok(ConstraintSet::default());
        }

        if !is_consistent_or_empty(&mut self.oracle, background)? {
            debug!("QuickXplain: the background is inconsistent on its own");
            return Ok(ConstraintSet::default());
        }

        let conflict = divide_and_conquer(
            &mut self.oracle,
            &ConflictConvention,
            &ConstraintSet::default(),
            consideration,
            background,
        )?;

        if FASTDIAG_ASSERT_LEVEL_DEFINITION >= FASTDIAG_ASSERT_ADVANCED {
            let is_inconsistent = !self.oracle.is_consistent(&background.union(&conflict))?;
            fastdiag_assert_advanced!(
                is_inconsistent,
                "the conflict {conflict} is consistent with the background"
            );
        }

        debug!("QuickXplain: found conflict {conflict}");
        Ok(conflict)
    }
}

/// `qx(Δ, C, B)`: the background grows with the half which is not being explored, and the second
/// half starts from the conflict found in the first.
#[derive(Clone, Copy, Debug)]
struct ConflictConvention;

impl BackgroundConvention for ConflictConvention {
    fn explores_second_half_first(&self) -> bool {
        true
    }

    fn is_settled<Oracle: ConsistencyOracle + ?Sized>(
        &self,
        oracle: &mut Oracle,
        _candidates: &ConstraintSet,
        background: &ConstraintSet,
    ) -> Result<bool, DiagnosisError> {
        Ok(!is_consistent_or_empty(oracle, background)?)
    }

    fn settled_result(&self, _candidates: &ConstraintSet) -> ConstraintSet {
        ConstraintSet::default()
    }

    fn leaf_result(&self, candidates: &ConstraintSet) -> ConstraintSet {
        candidates.clone()
    }

    fn first_background(
        &self,
        background: &ConstraintSet,
        unexplored: &ConstraintSet,
    ) -> ConstraintSet {
        background.union(unexplored)
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
        background: &ConstraintSet,
        first_result: &ConstraintSet,
    ) -> ConstraintSet {
        background.union(first_result)
    }
}
