mod error;
mod layout;
mod model;
mod random;

pub use error::GraphError;
pub use layout::{generate_layout, CircleLayout};
pub use model::{Edge, EdgeId, Graph, Node, NodeId};
pub use random::random_edges;
