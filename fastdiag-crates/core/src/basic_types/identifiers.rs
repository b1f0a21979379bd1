use std::fmt::Display;
use std::fmt::Formatter;
use std::num::NonZero;

use crate::containers::StorageKey;

/// An identifier for a single constraint of a knowledge base. Under the hood, an id is just a
/// [`NonZero<u32>`]. The underlying integer can be obtained through the [`Into`] implementation.
///
/// The diagnosis algorithms never look inside a constraint; they only pass sets of ids to a
/// [`ConsistencyOracle`](crate::oracle::ConsistencyOracle), which knows what the ids stand for.
/// Ids are handed out by whoever owns the knowledge base (typically through a
/// [`KeyedVec`](crate::containers::KeyedVec)), which keeps them unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(NonZero<u32>);

impl From<ConstraintId> for NonZero<u32> {
    fn from(value: ConstraintId) -> Self {
        value.0
    }
}

impl StorageKey for ConstraintId {
    fn index(&self) -> usize {
        self.0.get() as usize - 1
    }

    fn create_from_index(index: usize) -> Self {
        ConstraintId(
            NonZero::new(index as u32 + 1).expect("the '+ 1' ensures the value is non-zero"),
        )
    }
}

impl Display for ConstraintId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// An identifier for a test case, i.e. a group of constraints which describes one expected
/// behaviour of the knowledge base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TestCaseId(NonZero<u32>);

impl From<TestCaseId> for NonZero<u32> {
    fn from(value: TestCaseId) -> Self {
        value.0
    }
}

impl StorageKey for TestCaseId {
    fn index(&self) -> usize {
        self.0.get() as usize - 1
    }

    fn create_from_index(index: usize) -> Self {
        TestCaseId(
            NonZero::new(index as u32 + 1).expect("the '+ 1' ensures the value is non-zero"),
        )
    }
}

impl Display for TestCaseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}
