use std::num::NonZero;

use log::warn;

use super::fastdiag::find_bounded_diagnosis;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::oracle::ConsistencyOracle;

/// An anytime variant of [`FastDiag`](super::FastDiag) which trades the minimality of the
/// diagnosis for fewer consistency checks (Felfernig et al., 2018).
///
/// The recursion stops splitting as soon as the candidate set has at most `m` elements and takes
/// the whole candidate set into the diagnosis. The result is therefore still a diagnosis, but it
/// may contain up to `m - 1` unnecessary constraints per leaf. With `m = 1` the algorithm is
/// exactly FastDiag.
#[derive(Debug)]
pub struct FlexDiag<Oracle> {
    oracle: Oracle,
    m: NonZero<usize>,
}

impl<Oracle: ConsistencyOracle> FlexDiag<Oracle> {
    pub fn new(oracle: Oracle, m: NonZero<usize>) -> Self {
        Self { oracle, m }
    }

    /// The quality bound; the size of the candidate sets at which the recursion stops splitting.
    pub fn m(&self) -> NonZero<usize> {
        self.m
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

    /// Returns a diagnosis of `consideration` with respect to `all_constraints`, which is
    /// subset-minimal when `m = 1`.
    ///
    /// The result is empty under the same conditions as
    /// [`FastDiag::find_diagnosis`](super::FastDiag::find_diagnosis).
    pub fn find_diagnosis(
        &mut self,
        consideration: &ConstraintSet,
        all_constraints: &ConstraintSet,
    ) -> Result<ConstraintSet, DiagnosisError> {
        if self.m.get() > 1 && self.m.get() >= consideration.len() && !consideration.is_empty() {
            warn!(
                "FlexDiag: m = {} is not smaller than the consideration set ({} constraints)",
                self.m,
                consideration.len()
            );
        }

        find_bounded_diagnosis(
            &mut self.oracle,
            consideration,
            all_constraints,
            self.m,
            "FlexDiag",
        )
    }
}
