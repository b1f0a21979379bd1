use std::fmt::Display;
use std::fmt::Formatter;

use fastdiag_core::containers::StorageKey;
use itertools::Either;

/// An identifier for an integer variable of a [`KnowledgeBase`](crate::KnowledgeBase).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId {
    id: u32,
}

impl StorageKey for VariableId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        VariableId { id: index as u32 }
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

/// The values a variable can take. A bounded domain only stores its bounds, so wide ranges are as
/// cheap as narrow ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    representation: Representation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Representation {
    Interval { lower_bound: i32, upper_bound: i32 },
    /// Ascending and without duplicates.
    Values(Vec<i32>),
}

impl Domain {
    /// The values `lower_bound..=upper_bound`; empty if the bounds cross.
    pub fn bounded(lower_bound: i32, upper_bound: i32) -> Domain {
        Domain {
            representation: Representation::Interval {
                lower_bound,
                upper_bound,
            },
        }
    }

    pub fn sparse(values: impl Into<Vec<i32>>) -> Domain {
        let mut values = values.into();
        values.sort_unstable();
        values.dedup();

        Domain {
            representation: Representation::Values(values),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.representation {
            Representation::Interval {
                lower_bound,
                upper_bound,
            } => lower_bound > upper_bound,
            Representation::Values(values) => values.is_empty(),
        }
    }

    /// The values of the domain in ascending order.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        match &self.representation {
            Representation::Interval {
                lower_bound,
                upper_bound,
            } => Either::Left(*lower_bound..=*upper_bound),
            Representation::Values(values) => Either::Right(values.iter().copied()),
        }
    }

    pub fn lower_bound(&self) -> Option<i32> {
        match &self.representation {
            Representation::Interval { lower_bound, .. } => {
                (!self.is_empty()).then_some(*lower_bound)
            }
            Representation::Values(values) => values.first().copied(),
        }
    }

    pub fn upper_bound(&self) -> Option<i32> {
        match &self.representation {
            Representation::Interval { upper_bound, .. } => {
                (!self.is_empty()).then_some(*upper_bound)
            }
            Representation::Values(values) => values.last().copied(),
        }
    }
}

/// A variable of a [`KnowledgeBase`](crate::KnowledgeBase).
#[derive(Clone, Debug)]
pub struct Variable {
    pub(crate) name: Option<String>,
    pub(crate) domain: Domain,
}

impl Variable {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }
}
