use log::debug;

use super::divide_and_conquer::divide_and_conquer;
use super::divide_and_conquer::BackgroundConvention;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::basic_types::TestCaseSet;
use crate::oracle::is_consistent_or_empty;
use crate::oracle::ConsistencyOracle;

/// Computes a minimal diagnosis with FastDiag by searching for a maximal satisfiable subset
/// (MSS) of the consideration set, given the background explicitly.
///
/// The diagnosis is the complement of the MSS within the consideration set. Unlike
/// [`FastDiag`](super::FastDiag), the background grows with the satisfiable constraints found in
/// the first half before the second half is searched.
#[derive(Debug)]
pub struct FastDiagMss<Oracle> {
    oracle: Oracle,
}

impl<Oracle: ConsistencyOracle> FastDiagMss<Oracle> {
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

    /// Returns a minimal diagnosis of `consideration` with respect to `background`.
    ///
    /// The result is empty when `consideration` is empty, when `consideration ∪ background` is
    /// consistent, or when `background` is inconsistent on its own.
    pub fn find_diagnosis(
        &mut self,
        consideration: &ConstraintSet,
        background: &ConstraintSet,
    ) -> Result<ConstraintSet, DiagnosisError> {
        if consideration.is_empty() {
            debug!("FastDiag (MSS): the consideration set is empty");
            return Ok(ConstraintSet::default());
        }

        if self.oracle.is_consistent(&background.union(consideration))? {
            debug!("FastDiag (MSS): the knowledge base is consistent, no diagnosis is needed");
            return Ok(ConstraintSet::default());
        }

        if !is_consistent_or_empty(&mut self.oracle, background)? {
            debug!("FastDiag (MSS): the background is inconsistent on its own");
            return Ok(ConstraintSet::default());
        }

        let satisfiable_subset = divide_and_conquer(
            &mut self.oracle,
            &SatisfiableSubsetConvention { test_cases: None },
            &ConstraintSet::default(),
            consideration,
            background,
        )?;
        let diagnosis = consideration.difference(&satisfiable_subset);

        debug!("FastDiag (MSS): found diagnosis {diagnosis}");
        Ok(diagnosis)
    }
}

/// `fd(Δ, C, B)`: returns the part of `C` which belongs to the maximal satisfiable subset. The
/// first half is explored against `B`, the second against `B` plus what the first half kept.
///
/// With test cases, "consistent" means that none of the test cases is violated.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SatisfiableSubsetConvention<'a> {
    pub(crate) test_cases: Option<&'a TestCaseSet>,
}

impl BackgroundConvention for SatisfiableSubsetConvention<'_> {
    fn explores_second_half_first(&self) -> bool {
        false
    }

    fn is_settled<Oracle: ConsistencyOracle + ?Sized>(
        &self,
        oracle: &mut Oracle,
        candidates: &ConstraintSet,
        background: &ConstraintSet,
    ) -> Result<bool, DiagnosisError> {
        let constraints = background.union(candidates);

        match self.test_cases {
            Some(test_cases) => Ok(oracle
                .violated_test_cases(&constraints, test_cases, true)?
                .is_empty()),
            None => is_consistent_or_empty(oracle, &constraints),
        }
    }

    fn settled_result(&self, candidates: &ConstraintSet) -> ConstraintSet {
        candidates.clone()
    }

    fn leaf_result(&self, _candidates: &ConstraintSet) -> ConstraintSet {
        ConstraintSet::default()
    }

    fn first_background(
        &self,
        background: &ConstraintSet,
        _unexplored: &ConstraintSet,
    ) -> ConstraintSet {
        background.clone()
    }

    fn second_delta(
        &self,
        explored: &ConstraintSet,
        first_result: &ConstraintSet,
    ) -> ConstraintSet {
        explored.difference(first_result)
    }

    fn second_background(
        &self,
        background: &ConstraintSet,
        first_result: &ConstraintSet,
    ) -> ConstraintSet {
        background.union(first_result)
    }
}

#[cfg(test)]
mod tests {
    use super::FastDiagMss;
    use crate::algorithms::FastDiag;
    use crate::basic_types::ConstraintSet;
    use crate::test_oracle::is_consistent_without;
    use crate::test_oracle::set;
    use crate::test_oracle::TestOracle;

    #[test]
    fn diagnosis_is_the_complement_of_a_maximal_satisfiable_subset() {
        let conflicts: &[&[u32]] = &[&[1, 2], &[2, 3], &[4, 8], &[5, 6, 7]];
        let consideration = set(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let mut fastdiag = FastDiagMss::new(TestOracle::with_conflicts(conflicts));

        let diagnosis = fastdiag
            .find_diagnosis(&consideration, &ConstraintSet::default())
            .expect("no oracle error");

        assert!(is_consistent_without(conflicts, &consideration, &diagnosis));
        for constraint in diagnosis.iter() {
            assert!(!is_consistent_without(
                conflicts,
                &consideration,
                &diagnosis.without(constraint)
            ));
        }
    }

    #[test]
    fn agrees_with_the_all_constraints_variant_on_a_single_conflict() {
        let consideration = set(&[1, 2, 3, 4, 5, 6, 7]);

        let mss_diagnosis = FastDiagMss::new(TestOracle::with_conflicts(&[&[3, 5]]))
            .find_diagnosis(&consideration, &ConstraintSet::default())
            .expect("no oracle error");
        let ac_diagnosis = FastDiag::new(TestOracle::with_conflicts(&[&[3, 5]]))
            .find_diagnosis(&consideration, &consideration)
            .expect("no oracle error");

        assert_eq!(mss_diagnosis.len(), 1);
        assert_eq!(ac_diagnosis.len(), 1);
        assert!(mss_diagnosis.is_subset(&set(&[3, 5])));
    }

    #[test]
    fn background_is_respected() {
        let mut fastdiag = FastDiagMss::new(TestOracle::with_conflicts(&[&[1, 2], &[1, 3]]));

        let diagnosis = fastdiag
            .find_diagnosis(&set(&[2, 3]), &set(&[1]))
            .expect("no oracle error");

        assert_eq!(diagnosis, set(&[2, 3]));
    }

    #[test]
    fn consistent_knowledge_base_needs_no_diagnosis() {
        let mut fastdiag = FastDiagMss::new(TestOracle::with_conflicts(&[&[4]]));

        let diagnosis = fastdiag
            .find_diagnosis(&set(&[1, 2]), &set(&[3]))
            .expect("no oracle error");

        assert!(diagnosis.is_empty());
        assert_eq!(fastdiag.oracle().num_queries(), 1);
    }

    #[test]
    fn inconsistent_background_has_no_diagnosis() {
        let mut fastdiag = FastDiagMss::new(TestOracle::with_conflicts(&[&[3]]));

        let diagnosis = fastdiag
            .find_diagnosis(&set(&[1, 2]), &set(&[3]))
            .expect("no oracle error");

        assert!(diagnosis.is_empty());
    }
}
