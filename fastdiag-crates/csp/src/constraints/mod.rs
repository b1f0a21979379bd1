//! The constraint language of a [`KnowledgeBase`](crate::KnowledgeBase): disjunctions
//! ([`Clause`]) of linear comparisons ([`LinearComparison`]).
mod clause;
mod linear_comparison;

pub use clause::*;
pub use linear_comparison::*;

/// The state of a single check of a comparison or clause against the current bounds of the
/// variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Evaluation {
    /// Holds for every assignment within the bounds.
    Satisfied,
    /// Holds for no assignment within the bounds.
    Falsified,
    Undecided,
}
