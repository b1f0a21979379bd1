use std::fmt::Display;
use std::fmt::Formatter;

use crate::basic_types::ConstraintId;
use crate::basic_types::ConstraintSet;
use crate::containers::StorageKey;

/// The index of a [`Node`] in the arena of a
/// [`HittingSetEngine`](super::HittingSetEngine).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl StorageKey for NodeId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        NodeId(index as u32)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A node starts out [`NodeStatus::Open`] and is either closed by a pruning rule or checked when
/// its path turns out to be a hitting set of all labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    Open,
    /// The node was pruned without being labelled.
    Closed,
    /// The path to the node is a hitting set; the node has no label.
    Checked,
}

/// A node of the hitting-set tree (or DAG).
#[derive(Clone, Debug)]
pub struct Node<Parameters> {
    pub(crate) id: NodeId,
    pub(crate) level: usize,
    pub(crate) status: NodeStatus,
    pub(crate) label: Option<ConstraintSet>,
    pub(crate) arc: Option<ConstraintId>,
    pub(crate) path_labels: ConstraintSet,
    pub(crate) parameters: Parameters,
    pub(crate) parents: Vec<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl<Parameters> Node<Parameters> {
    pub(crate) fn root(id: NodeId, label: ConstraintSet, parameters: Parameters) -> Self {
        Node {
            id,
            level: 0,
            status: NodeStatus::Open,
            label: Some(label),
            arc: None,
            path_labels: ConstraintSet::default(),
            parameters,
            parents: vec![],
            children: vec![],
        }
    }

    pub(crate) fn child(
        id: NodeId,
        parent: &Node<Parameters>,
        arc: ConstraintId,
        parameters: Parameters,
    ) -> Self {
        Node {
            id,
            level: parent.level + 1,
            status: NodeStatus::Open,
            label: None,
            arc: Some(arc),
            path_labels: parent.path_labels.with(arc),
            parameters,
            parents: vec![parent.id],
            children: vec![],
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The depth of the node; the root is at level 0.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    pub fn label(&self) -> Option<&ConstraintSet> {
        self.label.as_ref()
    }

    /// The constraint on the edge from the (first) parent to this node. `None` for the root.
    pub fn arc(&self) -> Option<ConstraintId> {
        self.arc
    }

    /// The arcs on the path from the root to this node.
    pub fn path_labels(&self) -> &ConstraintSet {
        &self.path_labels
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The nodes which have an edge to this node; more than one only in a DAG.
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}
