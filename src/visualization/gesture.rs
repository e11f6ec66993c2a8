use crate::graph::{Graph, NodeId};

#[derive(Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    /// First click, waiting for the second endpoint
    Started(NodeId),
    /// Second click on another node
    Connect { source: NodeId, target: NodeId },
    /// Second click on the pending node itself
    Cancelled(NodeId),
}

/// Two clicks on different nodes request a new edge between them
#[derive(Clone, Debug, Default)]
pub struct EdgeGesture {
    pending: Option<NodeId>,
}

impl EdgeGesture {
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn click(&mut self, node: NodeId) -> GestureOutcome {
        match self.pending.take() {
            None => {
                self.pending = Some(node.clone());
                GestureOutcome::Started(node)
            }
            Some(source) if source == node => GestureOutcome::Cancelled(node),
            Some(source) => GestureOutcome::Connect {
                source,
                target: node,
            },
        }
    }

    /// Drops the pending source if `graph` no longer has it. Returns true if it was dropped.
    pub fn forget_missing(&mut self, graph: &Graph) -> bool {
        match &self.pending {
            Some(source) if !graph.contains_node(source) => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }
}
