use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use super::Evaluation;
use super::LinearComparison;
use crate::VariableId;

/// The disjunction `\/ comparison` of [`LinearComparison`]s.
///
/// An implication `a /\ b -> c` is the clause `!a \/ !b \/ c`, see [`Clause::implication`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    comparisons: Vec<LinearComparison>,
}

impl Clause {
    pub fn new(comparisons: impl Into<Vec<LinearComparison>>) -> Self {
        Clause {
            comparisons: comparisons.into(),
        }
    }

    /// Creates the clause `/\ premises -> \/ conclusions`.
    pub fn implication(
        premises: impl IntoIterator<Item = LinearComparison>,
        conclusions: impl IntoIterator<Item = LinearComparison>,
    ) -> Self {
        Clause {
            comparisons: premises
                .into_iter()
                .map(|premise| !premise)
                .chain(conclusions)
                .collect(),
        }
    }

    pub fn comparisons(&self) -> &[LinearComparison] {
        &self.comparisons
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.comparisons.iter().flat_map(LinearComparison::variables)
    }

    /// The clause is falsified when each of its comparisons is; the empty clause is always
    /// falsified.
    pub(crate) fn evaluate(&self, bounds: impl Fn(VariableId) -> (i64, i64)) -> Evaluation {
        let mut evaluation = Evaluation::Falsified;
        for comparison in &self.comparisons {
            match comparison.evaluate(&bounds) {
                Evaluation::Satisfied => return Evaluation::Satisfied,
                Evaluation::Undecided => evaluation = Evaluation::Undecided,
                Evaluation::Falsified => {}
            }
        }
        evaluation
    }
}

impl From<LinearComparison> for Clause {
    fn from(comparison: LinearComparison) -> Self {
        Clause::new(vec![comparison])
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.comparisons.is_empty() {
            write!(f, "false")
        } else {
            write!(f, "{}", self.comparisons.iter().join(" | "))
        }
    }
}
