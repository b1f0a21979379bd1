use std::fmt::Display;
use std::fmt::Formatter;
use std::num::NonZero;

/// The shape of the search space explored by the
/// [`HittingSetEngine`](super::HittingSetEngine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum HittingSetVariant {
    /// Every path gets its own node (HS-tree).
    Tree,
    /// Nodes with the same set of path labels are merged (HS-dag).
    #[default]
    Dag,
}

impl Display for HittingSetVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HittingSetVariant::Tree => write!(f, "HS-tree"),
            HittingSetVariant::Dag => write!(f, "HS-dag"),
        }
    }
}

/// Options which determine how the [`HittingSetEngine`](super::HittingSetEngine) behaves.
///
/// A limit of `None` means unbounded. Reaching a limit ends the search normally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HittingSetOptions {
    pub variant: HittingSetVariant,
    /// The search stops as soon as this many hitting sets have been found.
    pub max_number_of_diagnoses: Option<NonZero<usize>>,
    /// The search stops as soon as this many labels have been recorded.
    pub max_number_of_conflicts: Option<NonZero<usize>>,
    /// Nodes deeper than this are closed without being labelled.
    pub max_depth: Option<NonZero<usize>>,
}
