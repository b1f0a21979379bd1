mod diagnosis_error;
mod identifiers;

pub use diagnosis_error::*;
pub use identifiers::*;

use crate::containers::OrderedSet;

/// An ordered, duplicate-free set of constraints.
pub type ConstraintSet = OrderedSet<ConstraintId>;
/// An ordered, duplicate-free set of test cases.
pub type TestCaseSet = OrderedSet<TestCaseId>;
