use std::collections::{HashMap, HashSet};

use egui::Pos2;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::graph::GraphError;

pub type NodeId = String;
pub type EdgeId = String;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    pub fn pos(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }
}

/// Undirected multigraph edge. `source` and `target` are only storage order.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    #[cfg(test)]
    pub fn touches(&self, node: &str) -> bool {
        self.source == node || self.target == node
    }

    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            edges: vec![],
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Returns false if there is no node with the given id
    pub fn move_node(&mut self, id: &str, x: f32, y: f32) -> bool {
        match self.nodes.iter_mut().find(|node| node.id == id) {
            Some(node) => {
                node.x = x;
                node.y = y;
                true
            }
            None => false,
        }
    }

    pub fn positions(&self) -> HashMap<NodeId, Pos2> {
        self.nodes
            .iter()
            .map(|node| (node.id.clone(), node.pos()))
            .collect()
    }

    /// Appends a new edge between two existing, distinct nodes and returns its id.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<EdgeId, GraphError> {
        for endpoint in [source, target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::UnknownNode(endpoint.to_string()));
            }
        }
        if source == target {
            return Err(GraphError::SelfLoop(source.to_string()));
        }

        let id = self.fresh_edge_id();
        self.edges.push(Edge::new(id.clone(), source, target));
        Ok(id)
    }

    fn fresh_edge_id(&self) -> EdgeId {
        let used: HashSet<&str> = self.edges.iter().map(|edge| edge.id.as_str()).collect();
        (1usize..)
            .map(|n| format!("u{}", n))
            .find(|candidate| !used.contains(candidate.as_str()))
            .unwrap_or_default()
    }

    /// Checks that every edge connects two distinct existing nodes and that edge ids are unique.
    pub fn validate(&self) -> Result<(), GraphError> {
        let node_ids: HashSet<&str> = self.nodes.iter().map(|node| node.id.as_str()).collect();
        let mut edge_ids = HashSet::with_capacity(self.edges.len());

        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(GraphError::DuplicateEdgeId(edge.id.clone()));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(GraphError::DanglingEdge {
                        edge: edge.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
            if edge.is_loop() {
                return Err(GraphError::SelfLoop(edge.source.clone()));
            }
        }

        Ok(())
    }

    /// Number of connected components. Edges with unknown endpoints are ignored.
    pub fn component_count(&self) -> usize {
        let mut graph = UnGraph::<(), ()>::with_capacity(self.node_count(), self.edge_count());
        let indices: HashMap<&str, NodeIndex> = self
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), graph.add_node(())))
            .collect();

        for edge in &self.edges {
            if let (Some(&a), Some(&b)) = (
                indices.get(edge.source.as_str()),
                indices.get(edge.target.as_str()),
            ) {
                graph.add_edge(a, b, ());
            }
        }

        connected_components(&graph)
    }
}
