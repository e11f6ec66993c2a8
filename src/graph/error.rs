use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("node '{0}' does not exist")]
    UnknownNode(NodeId),

    #[error("edge from '{0}' to itself is not allowed")]
    SelfLoop(NodeId),

    /// An edge names an endpoint that is missing from the node list
    #[error("edge '{edge}' references missing node '{node}'")]
    DanglingEdge { edge: EdgeId, node: NodeId },

    #[error("edge id '{0}' is used more than once")]
    DuplicateEdgeId(EdgeId),

    #[error("edge probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}
