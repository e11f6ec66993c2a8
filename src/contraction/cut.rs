use crate::graph::{EdgeId, NodeId};

/// Two-way cut found by a converged contraction run
#[derive(Clone, Debug, PartialEq)]
pub struct Cut {
    /// Original nodes merged into the first remaining super-node
    pub source_set: Vec<NodeId>,
    /// Original nodes merged into the second remaining super-node
    pub destination_set: Vec<NodeId>,
    pub cut_edge_set: Vec<EdgeId>,
    pub size: usize,
}

impl Cut {
    pub fn new(
        source_set: Vec<NodeId>,
        destination_set: Vec<NodeId>,
        cut_edge_set: Vec<EdgeId>,
    ) -> Self {
        let size = cut_edge_set.len();
        Self {
            source_set,
            destination_set,
            cut_edge_set,
            size,
        }
    }

    pub fn contains_edge(&self, edge: &str) -> bool {
        self.cut_edge_set.iter().any(|id| id == edge)
    }
}
