//! Labelers adapt one of the [`algorithms`](crate::algorithms) to the
//! [`HittingSetEngine`](crate::hitting_set::HittingSetEngine).
//!
//! The engine does not care whether it is searching over conflicts or diagnoses. It asks the
//! labeler for a label of a node, where an empty label means that the path to the node hits every
//! label which can ever be found. With a conflict labeler ([`QuickXplainLabeler`]) the labels are
//! conflicts and the paths which end in an empty label are diagnoses; with a diagnosis labeler
//! ([`FastDiagLabeler`], [`FastDiagMssLabeler`] and [`FlexDiagLabeler`]) it is the other way
//! around.
mod fastdiag_labeler;
mod fastdiag_mss_labeler;
mod flexdiag_labeler;
mod quickxplain_labeler;

use std::fmt::Debug;

pub use fastdiag_labeler::*;
pub use fastdiag_mss_labeler::*;
pub use flexdiag_labeler::*;
pub use quickxplain_labeler::*;

use crate::basic_types::ConstraintId;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;

/// Computes the labels of the nodes of a hitting-set search.
///
/// Every node carries a bundle of [`Labeler::Parameters`], which is derived from the bundle of its
/// parent with [`Labeler::child_parameters`]; the root starts from
/// [`Labeler::initial_parameters`].
pub trait Labeler {
    /// The input of a single call to the underlying algorithm.
    type Parameters: Clone + Debug;

    /// The constraints from which labels are drawn.
    fn consideration_set(&self) -> &ConstraintSet;

    /// The constraints which are assumed to be correct; they never appear in a label.
    fn background_set(&self) -> &ConstraintSet;

    /// The parameters of the root node.
    fn initial_parameters(&self) -> Self::Parameters;

    /// Computes the labels for a node with the given parameters.
    ///
    /// An empty vector means the node has no label. The minimal labelers return at most one
    /// label.
    fn label(
        &mut self,
        parameters: &Self::Parameters,
    ) -> Result<Vec<ConstraintSet>, DiagnosisError>;

    /// The parameters of the child which is reached over `arc`. The returned parameters never
    /// allow `arc` to be part of a label.
    fn child_parameters(&self, parameters: &Self::Parameters, arc: ConstraintId)
        -> Self::Parameters;

    /// Whether every label is guaranteed to be subset-minimal.
    fn is_minimal(&self) -> bool {
        true
    }

    /// Disposes of the underlying oracle.
    fn dispose(&mut self);
}

/// Turns the result of a single-label algorithm into the labels of a node.
fn into_labels(label: ConstraintSet) -> Vec<ConstraintSet> {
    if label.is_empty() {
        vec![]
    } else {
        vec![label]
    }
}
