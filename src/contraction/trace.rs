use crate::contraction::Cut;
use crate::graph::{EdgeId, Graph, NodeId};

/// Endpoints of the edge that is about to be contracted
#[derive(Clone, Debug, PartialEq)]
pub struct MergePair {
    pub u: NodeId,
    pub v: NodeId,
}

impl MergePair {
    pub fn contains(&self, node: &str) -> bool {
        self.u == node || self.v == node
    }
}

/// Snapshot of the working graph at one point of a contraction run.
///
/// Every step owns its graph, so steps can be shown in any order.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceStep {
    pub graph: Graph,
    pub description: String,
    pub selected_edge_id: Option<EdgeId>,
    pub merge_pair: Option<MergePair>,
    pub merged_nodes: Option<(NodeId, NodeId)>,
}

impl TraceStep {
    pub(crate) fn snapshot(graph: &Graph, description: impl Into<String>) -> Self {
        Self {
            graph: graph.clone(),
            description: description.into(),
            selected_edge_id: None,
            merge_pair: None,
            merged_nodes: None,
        }
    }
}

/// Why the contraction loop stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Exactly two super-nodes are left
    Converged,
    /// No edges are left while more than two nodes remain, the graph was disconnected
    EdgesExhausted { remaining_nodes: usize },
    /// The input had fewer than two nodes
    TooFewNodes,
}

impl Termination {
    pub fn describe(&self) -> String {
        match self {
            Termination::Converged => "Done: 2 nodes remain".to_string(),
            Termination::EdgesExhausted { remaining_nodes } => format!(
                "Done early: no edges left, {} nodes remain",
                remaining_nodes
            ),
            Termination::TooFewNodes => "Done: nothing to contract".to_string(),
        }
    }
}

/// Ordered, immutable record of one contraction run.
///
/// Layout: the initial snapshot, then a (selection, merge) pair per contraction, then the final snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    steps: Vec<TraceStep>,
    termination: Termination,
    cut: Option<Cut>,
}

impl Trace {
    pub(crate) fn new(steps: Vec<TraceStep>, termination: Termination, cut: Option<Cut>) -> Self {
        assert!(!steps.is_empty(), "a trace always holds at least one step");
        Self {
            steps,
            termination,
            cut,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    #[cfg(test)]
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Step at `index`, clamped to the last step
    pub fn current_step(&self, index: usize) -> &TraceStep {
        &self.steps[index.min(self.last_index())]
    }

    pub fn final_step(&self) -> &TraceStep {
        self.current_step(self.last_index())
    }

    /// Selection steps sit at odd indices, the final snapshot excluded
    pub fn is_selection_step(&self, index: usize) -> bool {
        index % 2 == 1 && index < self.last_index()
    }

    pub fn merge_count(&self) -> usize {
        (self.steps.len() - 2) / 2
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn cut(&self) -> Option<&Cut> {
        self.cut.as_ref()
    }
}
