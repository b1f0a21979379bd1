use std::collections::VecDeque;
use std::num::NonZero;

use log::debug;
use log::info;
use log::trace;

use super::HittingSetOptions;
use super::HittingSetVariant;
use super::Node;
use super::NodeId;
use super::NodeStatus;
use crate::basic_types::ConstraintId;
use crate::basic_types::ConstraintSet;
use crate::basic_types::DiagnosisError;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::create_statistics_struct;
use crate::fastdiag_assert_moderate;
use crate::fastdiag_assert_simple;
use crate::labelers::Labeler;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::termination::Indefinite;
use crate::termination::TerminationCondition;

create_statistics_struct!(
    /// The statistics gathered by a [`HittingSetEngine`].
    HittingSetStatistics {
        /// The number of nodes added to the tree (or DAG), including the root
        num_nodes_created: u64,
        /// The number of times the labeler was asked for a label
        num_labels_computed: u64,
        /// The number of nodes which were labelled with a label found earlier
        num_conflicts_reused: u64,
        /// The number of nodes which were pruned without a label
        num_nodes_closed: u64,
        /// The number of children which were discarded because a known hitting set subsumes them
        num_children_discarded: u64,
        /// The number of children which were merged into an existing node with the same path
        num_nodes_merged: u64,
        /// The number of nodes whose path is a hitting set
        num_nodes_checked: u64,
});

/// How a call to [`HittingSetEngine::construct`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionOutcome {
    /// Every node has been processed; up to the depth limit, all hitting sets have been found.
    Exhausted,
    /// One of the limits on the number of conflicts or diagnoses was reached.
    LimitReached,
    /// The [`TerminationCondition`] triggered. The engine can be resumed by calling
    /// [`HittingSetEngine::construct`] again.
    Interrupted,
}

/// Enumerates the minimal hitting sets of the labels produced by a [`Labeler`] with Reiter's
/// HS-tree or Greiner's HS-dag.
///
/// With a conflict labeler (e.g. [`QuickXplainLabeler`](crate::labelers::QuickXplainLabeler))
/// [`HittingSetEngine::conflicts`] holds the conflicts which were computed and
/// [`HittingSetEngine::diagnoses`] the diagnoses. With a diagnosis labeler the roles are swapped:
/// the labels are diagnoses, and the hitting sets are the conflicts.
///
/// The nodes are processed in breadth-first order, so the hitting sets are found in order of
/// non-decreasing size. The engine relies on three rules to keep the search small:
/// - a label found earlier which is disjoint from the path of a node is reused instead of asking
///   the labeler;
/// - a node whose path contains a hitting set found earlier is closed;
/// - in the DAG variant, a node with the same set of path labels as an open node is not created,
///   instead the open node gains another parent.
///
/// # Example
/// ```rust
/// # use fastdiag_core::hitting_set::HittingSetEngine;
/// # use fastdiag_core::hitting_set::HittingSetOptions;
/// # use fastdiag_core::labelers::QuickXplainLabeler;
/// # use fastdiag_core::oracle::ConsistencyOracle;
/// # use fastdiag_core::ConstraintSet;
/// # fn example(oracle: impl ConsistencyOracle, c: ConstraintSet) {
/// let labeler = QuickXplainLabeler::new(oracle, c, ConstraintSet::default());
/// let mut engine = HittingSetEngine::new(labeler, HittingSetOptions::default());
///
/// let _ = engine.construct().expect("the oracle did not fail");
/// for diagnosis in engine.diagnoses() {
///     println!("{diagnosis}");
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct HittingSetEngine<L: Labeler> {
    labeler: L,
    options: HittingSetOptions,
    nodes: KeyedVec<NodeId, Node<L::Parameters>>,
    root: Option<NodeId>,
    /// Whether the root has been labelled, possibly without creating it.
    started: bool,
    open_nodes: VecDeque<NodeId>,
    /// The open nodes of the DAG variant, keyed by their sorted path labels.
    open_paths: HashMap<Vec<ConstraintId>, NodeId>,
    conflicts: Vec<ConstraintSet>,
    diagnoses: Vec<ConstraintSet>,
    statistics: HittingSetStatistics,
}

impl<L: Labeler> HittingSetEngine<L> {
    pub fn new(labeler: L, options: HittingSetOptions) -> Self {
        HittingSetEngine {
            labeler,
            options,
            nodes: KeyedVec::default(),
            root: None,
            started: false,
            open_nodes: VecDeque::default(),
            open_paths: HashMap::default(),
            conflicts: vec![],
            diagnoses: vec![],
            statistics: HittingSetStatistics::default(),
        }
    }

    /// Runs the search until it is exhausted or a limit is reached.
    pub fn construct(&mut self) -> Result<ConstructionOutcome, DiagnosisError> {
        self.construct_with_termination(&mut Indefinite)
    }

    /// Runs the search until it is exhausted, a limit is reached, or `termination` triggers.
    ///
    /// The termination condition is polled before each node is processed. If the engine was
    /// interrupted or stopped at a limit before, the search continues where it left off.
    ///
    /// An error of the labeler aborts the search; the hitting sets found so far stay available,
    /// but the search cannot be resumed reliably afterwards.
    pub fn construct_with_termination(
        &mut self,
        termination: &mut impl TerminationCondition,
    ) -> Result<ConstructionOutcome, DiagnosisError> {
        info!("Starting {} construction", self.options.variant);

        if !self.started {
            self.started = true;
            if !self.create_root()? {
                info!("The root has no label, there is nothing to hit");
                return Ok(ConstructionOutcome::Exhausted);
            }
        }

        if self.is_limit_reached() {
            return Ok(ConstructionOutcome::LimitReached);
        }

        while !self.open_nodes.is_empty() {
            if termination.should_stop() {
                info!("The construction was interrupted");
                return Ok(ConstructionOutcome::Interrupted);
            }

            let Some(node_id) = self.open_nodes.pop_front() else {
                break;
            };
            self.process_node(node_id)?;

            if self.is_limit_reached() {
                info!(
                    "Stopped at a limit with {} conflicts and {} diagnoses",
                    self.conflicts.len(),
                    self.diagnoses.len()
                );
                return Ok(ConstructionOutcome::LimitReached);
            }
        }

        info!(
            "Finished the construction with {} conflicts and {} diagnoses",
            self.conflicts.len(),
            self.diagnoses.len()
        );
        Ok(ConstructionOutcome::Exhausted)
    }

    /// The labels which were computed, in the order in which they were found.
    pub fn conflicts(&self) -> &[ConstraintSet] {
        &self.conflicts
    }

    /// The hitting sets which were found, in order of non-decreasing size.
    pub fn diagnoses(&self) -> &[ConstraintSet] {
        &self.diagnoses
    }

    pub fn options(&self) -> &HittingSetOptions {
        &self.options
    }

    pub fn set_max_number_of_diagnoses(&mut self, limit: Option<NonZero<usize>>) {
        self.options.max_number_of_diagnoses = limit;
    }

    pub fn set_max_number_of_conflicts(&mut self, limit: Option<NonZero<usize>>) {
        self.options.max_number_of_conflicts = limit;
    }

    /// Changing the depth limit does not reopen nodes which were closed under the old limit.
    pub fn set_max_depth(&mut self, limit: Option<NonZero<usize>>) {
        self.options.max_depth = limit;
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, node_id: NodeId) -> &Node<L::Parameters> {
        &self.nodes[node_id]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<L::Parameters>> {
        self.nodes.iter()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn labeler(&self) -> &L {
        &self.labeler
    }

    pub fn labeler_mut(&mut self) -> &mut L {
        &mut self.labeler
    }

    pub fn statistics(&self) -> HittingSetStatistics {
        self.statistics
    }

    pub fn log_statistics(&self) {
        self.statistics.log(StatisticLogger::new(["hitting_set"]));
    }

    /// Removes all nodes and results, so that the next call to [`HittingSetEngine::construct`]
    /// starts from scratch.
    pub fn reset_engine(&mut self) {
        debug!("Resetting the hitting-set engine");
        self.nodes.clear();
        self.root = None;
        self.started = false;
        self.open_nodes.clear();
        self.open_paths.clear();
        self.conflicts.clear();
        self.diagnoses.clear();
        self.statistics = HittingSetStatistics::default();
    }

    /// Disposes of the labeler (and with it, its oracle) and returns the hitting sets.
    pub fn dispose(mut self) -> Vec<ConstraintSet> {
        self.labeler.dispose();
        self.diagnoses
    }

    fn is_limit_reached(&self) -> bool {
        let reached = |limit: Option<NonZero<usize>>, count: usize| {
            limit.is_some_and(|limit| count >= limit.get())
        };

        reached(self.options.max_number_of_diagnoses, self.diagnoses.len())
            || reached(self.options.max_number_of_conflicts, self.conflicts.len())
    }

    /// Labels the root; returns whether it has a label, in which case it is created and queued.
    fn create_root(&mut self) -> Result<bool, DiagnosisError> {
        let parameters = self.labeler.initial_parameters();
        let labels = self.labeler.label(&parameters)?;
        self.statistics.num_labels_computed += 1;

        let Some(label) = labels.first().cloned() else {
            return Ok(false);
        };
        self.record_conflicts(labels);

        let root_id = NodeId::create_from_index(self.nodes.len());
        let _ = self.nodes.push(Node::root(root_id, label, parameters));
        self.statistics.num_nodes_created += 1;
        self.root = Some(root_id);
        self.open_nodes.push_back(root_id);

        trace!("Created the root {root_id}");
        Ok(true)
    }

    fn process_node(&mut self, node_id: NodeId) -> Result<(), DiagnosisError> {
        let _ = self.open_paths.remove(&self.nodes[node_id].path_labels.sorted_elements());

        if self.nodes[node_id].label.is_none() {
            let node = &self.nodes[node_id];

            if self
                .options
                .max_depth
                .is_some_and(|max_depth| node.level > max_depth.get())
            {
                trace!("Closing {node_id}, it is beyond the maximum depth");
                self.close(node_id);
                return Ok(());
            }

            if self.is_subsumed(&node.path_labels) {
                trace!("Closing {node_id}, its path contains a known diagnosis");
                self.close(node_id);
                return Ok(());
            }

            match self.find_label(node_id)? {
                Some(label) => self.nodes[node_id].label = Some(label),
                None => {
                    let path = self.nodes[node_id].path_labels.clone();
                    trace!("Checked {node_id}, found diagnosis {path}");

                    self.nodes[node_id].status = NodeStatus::Checked;
                    self.statistics.num_nodes_checked += 1;
                    self.diagnoses.push(path);
                    return Ok(());
                }
            }
        }

        self.expand(node_id);
        Ok(())
    }

    /// Reuses a known label which is disjoint from the path to the node, or computes a new one.
    fn find_label(&mut self, node_id: NodeId) -> Result<Option<ConstraintSet>, DiagnosisError> {
        let node = &self.nodes[node_id];

        if let Some(conflict) = self
            .conflicts
            .iter()
            .find(|conflict| conflict.is_disjoint(&node.path_labels))
        {
            trace!("Reusing {conflict} as the label of {node_id}");
            self.statistics.num_conflicts_reused += 1;
            return Ok(Some(conflict.clone()));
        }

        let labels = self.labeler.label(&node.parameters)?;
        self.statistics.num_labels_computed += 1;

        let label = labels.first().cloned();
        if let Some(label) = &label {
            fastdiag_assert_simple!(
                label.is_disjoint(&node.path_labels),
                "a label never contains one of the arcs leading to its node"
            );
            trace!("Computed {label} as the label of {node_id}");
        }
        self.record_conflicts(labels);

        Ok(label)
    }

    /// Stores newly found labels, up to the maximum number of conflicts.
    fn record_conflicts(&mut self, labels: Vec<ConstraintSet>) {
        for label in labels {
            if self
                .options
                .max_number_of_conflicts
                .is_some_and(|limit| self.conflicts.len() >= limit.get())
            {
                break;
            }

            if !self.conflicts.contains(&label) {
                debug!("Found conflict {label}");
                self.conflicts.push(label);
            }
        }
    }

    fn expand(&mut self, node_id: NodeId) {
        let Some(label) = self.nodes[node_id].label.clone() else {
            return;
        };

        for arc in label.iter() {
            let path = self.nodes[node_id].path_labels.with(arc);

            if self.is_subsumed(&path) {
                self.statistics.num_children_discarded += 1;
                continue;
            }

            let key = path.sorted_elements();
            if self.options.variant == HittingSetVariant::Dag {
                if let Some(&existing) = self.open_paths.get(&key) {
                    fastdiag_assert_moderate!(self.nodes[existing].status == NodeStatus::Open);
                    trace!("Merging the child of {node_id} over {arc} into {existing}");

                    self.nodes[existing].parents.push(node_id);
                    self.nodes[node_id].children.push(existing);
                    self.statistics.num_nodes_merged += 1;
                    continue;
                }
            }

            let parameters = self
                .labeler
                .child_parameters(&self.nodes[node_id].parameters, arc);
            let child_id = NodeId::create_from_index(self.nodes.len());
            let child = Node::child(child_id, &self.nodes[node_id], arc, parameters);
            let _ = self.nodes.push(child);
            self.statistics.num_nodes_created += 1;

            self.nodes[node_id].children.push(child_id);
            self.open_nodes.push_back(child_id);
            if self.options.variant == HittingSetVariant::Dag {
                let _ = self.open_paths.insert(key, child_id);
            }
        }
    }

    fn close(&mut self, node_id: NodeId) {
        self.nodes[node_id].status = NodeStatus::Closed;
        self.statistics.num_nodes_closed += 1;
    }

    /// Whether `path` contains a hitting set which was found before.
    fn is_subsumed(&self, path: &ConstraintSet) -> bool {
        self.diagnoses
            .iter()
            .any(|diagnosis| diagnosis.is_subset(path))
    }
}
