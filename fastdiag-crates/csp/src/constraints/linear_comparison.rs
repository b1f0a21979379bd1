use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;

use itertools::Itertools;

use super::Evaluation;
use crate::VariableId;

/// The relation between the left-hand side of a [`LinearComparison`] and zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparator {
    Equal,
    NotEqual,
    LessOrEqual,
    GreaterOrEqual,
    Less,
    Greater,
}

impl Not for Comparator {
    type Output = Comparator;

    fn not(self) -> Comparator {
        match self {
            Comparator::Equal => Comparator::NotEqual,
            Comparator::NotEqual => Comparator::Equal,
            Comparator::LessOrEqual => Comparator::Greater,
            Comparator::GreaterOrEqual => Comparator::Less,
            Comparator::Less => Comparator::GreaterOrEqual,
            Comparator::Greater => Comparator::LessOrEqual,
        }
    }
}

impl Display for Comparator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Comparator::Equal => "=",
            Comparator::NotEqual => "!=",
            Comparator::LessOrEqual => "<=",
            Comparator::GreaterOrEqual => ">=",
            Comparator::Less => "<",
            Comparator::Greater => ">",
        };
        write!(f, "{symbol}")
    }
}

/// The comparison `Σ a_i * x_i + k ⋈ 0`.
///
/// Merged coefficients are kept as `i64` and evaluation is done in `i128`, so no sum of `i32`
/// coefficients or product with a domain bound can overflow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearComparison {
    terms: Vec<(i64, VariableId)>,
    constant: i32,
    comparator: Comparator,
}

impl LinearComparison {
    /// Creates the comparison `Σ coefficient * variable + constant ⋈ 0`. Terms over the same
    /// variable are merged, and terms with a zero coefficient are dropped.
    pub fn new(terms: Vec<(i32, VariableId)>, constant: i32, comparator: Comparator) -> Self {
        let terms = terms
            .into_iter()
            .into_group_map_by(|&(_, variable)| variable)
            .into_iter()
            .map(|(variable, terms)| (terms.iter().map(|&(a, _)| a as i64).sum::<i64>(), variable))
            .filter(|&(coefficient, _)| coefficient != 0)
            .sorted_by_key(|&(_, variable)| variable)
            .collect();

        LinearComparison {
            terms,
            constant,
            comparator,
        }
    }

    pub fn terms(&self) -> &[(i64, VariableId)] {
        &self.terms
    }

    pub fn constant(&self) -> i32 {
        self.constant
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.terms.iter().map(|&(_, variable)| variable)
    }

    /// Checks the comparison against the given bounds `(lower, upper)` of its variables.
    pub(crate) fn evaluate(&self, bounds: impl Fn(VariableId) -> (i64, i64)) -> Evaluation {
        let (mut minimum, mut maximum) = (self.constant as i128, self.constant as i128);
        for &(coefficient, variable) in &self.terms {
            let (lower, upper) = bounds(variable);
            let coefficient = coefficient as i128;
            let (at_lower, at_upper) = (coefficient * lower as i128, coefficient * upper as i128);
            minimum += at_lower.min(at_upper);
            maximum += at_lower.max(at_upper);
        }

        let (always, never) = match self.comparator {
            Comparator::Equal => (minimum == 0 && maximum == 0, minimum > 0 || maximum < 0),
            Comparator::NotEqual => (minimum > 0 || maximum < 0, minimum == 0 && maximum == 0),
            Comparator::LessOrEqual => (maximum <= 0, minimum > 0),
            Comparator::GreaterOrEqual => (minimum >= 0, maximum < 0),
            Comparator::Less => (maximum < 0, minimum >= 0),
            Comparator::Greater => (minimum > 0, maximum <= 0),
        };

        if always {
            Evaluation::Satisfied
        } else if never {
            Evaluation::Falsified
        } else {
            Evaluation::Undecided
        }
    }
}

impl Not for LinearComparison {
    type Output = LinearComparison;

    fn not(self) -> LinearComparison {
        LinearComparison {
            comparator: !self.comparator,
            ..self
        }
    }
}

impl Display for LinearComparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let terms = self
            .terms
            .iter()
            .map(|(coefficient, variable)| format!("{coefficient}*{variable}"))
            .chain((self.constant != 0 || self.terms.is_empty()).then(|| self.constant.to_string()))
            .join(" + ");
        write!(f, "{terms} {} 0", self.comparator)
    }
}
