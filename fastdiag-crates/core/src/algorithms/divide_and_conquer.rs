use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::fastdiag_assert_simple;
use crate::oracle::ConsistencyOracle;

/// Describes how the divide-and-conquer recursion shared by all algorithms in this module treats
/// its background set.
///
/// The recursion works on a triple `(delta, candidates, background)`:
/// 1. if `delta` is non-empty, the caller has just changed the background, and
///    [`BackgroundConvention::is_settled`] decides whether `candidates` can be skipped entirely;
/// 2. a leaf (see [`BackgroundConvention::is_leaf`]) is answered without consulting the oracle;
/// 3. otherwise `candidates` is split in half, one half is explored first, and its result is
///    threaded into the delta and background of the call which explores the other half.
pub(crate) trait BackgroundConvention {
    /// Whether the first recursive call explores the second half of the split.
    fn explores_second_half_first(&self) -> bool;

    /// Decides whether nothing is left to be found in `candidates` under `background`.
    fn is_settled<Oracle: ConsistencyOracle + ?Sized>(
        &self,
        oracle: &mut Oracle,
        candidates: &ConstraintSet,
        background: &ConstraintSet,
    ) -> Result<bool, DiagnosisError>;

    /// The result of a call for which [`BackgroundConvention::is_settled`] holds.
    fn settled_result(&self, candidates: &ConstraintSet) -> ConstraintSet;

    fn is_leaf(&self, candidates: &ConstraintSet) -> bool {
        candidates.len() == 1
    }

    /// The result of a call on a leaf.
    fn leaf_result(&self, candidates: &ConstraintSet) -> ConstraintSet;

    /// The background of the first recursive call, given the half which is explored second.
    fn first_background(
        &self,
        background: &ConstraintSet,
        unexplored: &ConstraintSet,
    ) -> ConstraintSet;

    /// The delta of the second recursive call, given the half explored by the first call and its
    /// result.
    fn second_delta(&self, explored: &ConstraintSet, first_result: &ConstraintSet)
        -> ConstraintSet;

    /// The background of the second recursive call.
    fn second_background(
        &self,
        background: &ConstraintSet,
        first_result: &ConstraintSet,
    ) -> ConstraintSet;
}

/// The recursive worker shared by QuickXplain, FastDiag, DirectDebug and FlexDiag.
///
/// The two halves of a split are always processed in the same order, so the same inputs and
/// oracle answers give the same result. The part of the result coming from the first half of the
/// split is listed first.
pub(crate) fn divide_and_conquer<Oracle, Convention>(
    oracle: &mut Oracle,
    convention: &Convention,
    delta: &ConstraintSet,
    candidates: &ConstraintSet,
    background: &ConstraintSet,
) -> Result<ConstraintSet, DiagnosisError>
where
    Oracle: ConsistencyOracle + ?Sized,
    Convention: BackgroundConvention,
{
    fastdiag_assert_simple!(
        !candidates.is_empty(),
        "the recursion is never entered with an empty candidate set"
    );

    if !delta.is_empty() && convention.is_settled(oracle, candidates, background)? {
        return Ok(convention.settled_result(candidates));
    }

    if convention.is_leaf(candidates) {
        return Ok(convention.leaf_result(candidates));
    }

    let (lower, upper) = candidates.split();
    let second_half_first = convention.explores_second_half_first();
    let (explored, unexplored) = if second_half_first {
        (&upper, &lower)
    } else {
        (&lower, &upper)
    };

    let first_result = divide_and_conquer(
        oracle,
        convention,
        unexplored,
        explored,
        &convention.first_background(background, unexplored),
    )?;

    let second_result = divide_and_conquer(
        oracle,
        convention,
        &convention.second_delta(explored, &first_result),
        unexplored,
        &convention.second_background(background, &first_result),
    )?;

    let result = if second_half_first {
        second_result.union(&first_result)
    } else {
        first_result.union(&second_result)
    };

    fastdiag_assert_simple!(result.is_subset(candidates));

    Ok(result)
}
