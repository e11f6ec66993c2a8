use std::collections::HashMap;

use log::{debug, info};
use petgraph::unionfind::UnionFind;

use crate::contraction::{Cut, MergePair, Termination, Trace, TraceStep};
use crate::graph::{Graph, Node, NodeId};

/// Tracks which original nodes every super-node of the working graph stands for.
struct Membership {
    originals: Vec<NodeId>,
    sets: UnionFind<usize>,
    representative: HashMap<NodeId, usize>,
}

impl Membership {
    fn new(nodes: &[Node]) -> Self {
        Self {
            originals: nodes.iter().map(|node| node.id.clone()).collect(),
            sets: UnionFind::new(nodes.len()),
            representative: nodes
                .iter()
                .enumerate()
                .map(|(i, node)| (node.id.clone(), i))
                .collect(),
        }
    }

    fn merge(&mut self, u: &str, v: &str, merged: &NodeId) {
        let first = self.representative.remove(u);
        let second = self.representative.remove(v);
        match (first, second) {
            (Some(a), Some(b)) => {
                self.sets.union(a, b);
                self.representative.insert(merged.clone(), a);
            }
            (Some(a), None) | (None, Some(a)) => {
                self.representative.insert(merged.clone(), a);
            }
            (None, None) => {}
        }
    }

    fn members_of(&self, node: &str) -> Vec<NodeId> {
        let Some(&index) = self.representative.get(node) else {
            return vec![];
        };
        let root = self.sets.find(index);
        self.originals
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.sets.find(i) == root)
            .map(|(_, id)| id.clone())
            .collect()
    }
}

/// Maps a sample from `[0, 1)` to an index below `len`.
fn pick_index(sample: f64, len: usize) -> usize {
    // NaN and negative samples saturate to 0
    ((sample * len as f64).floor() as usize).min(len - 1)
}

/// Contracts `u` and `v` into a node named `u_v` placed at their midpoint and drops resulting self-loops.
///
/// Returns the id of the merged node and the number of removed loops.
fn contract(graph: &mut Graph, u: &str, v: &str) -> (NodeId, usize) {
    let merged_id = format!("{}_{}", u, v);
    let position = |id: &str| graph.node(id).map(Node::pos);
    let midpoint = match (position(u), position(v)) {
        (Some(a), Some(b)) => a.lerp(b, 0.5),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => egui::Pos2::ZERO,
    };

    graph.nodes.retain(|node| node.id != u && node.id != v);
    graph
        .nodes
        .push(Node::new(merged_id.clone(), midpoint.x, midpoint.y));

    for edge in graph.edges.iter_mut() {
        if edge.source == u || edge.source == v {
            edge.source = merged_id.clone();
        }
        if edge.target == u || edge.target == v {
            edge.target = merged_id.clone();
        }
    }

    let before = graph.edges.len();
    graph.edges.retain(|edge| !edge.is_loop());

    (merged_id, before - graph.edges.len())
}

/// Runs randomized edge contraction on a copy of `initial` and records every intermediate graph.
///
/// `rng` must yield samples in `[0, 1)`; each sample picks one edge uniformly from the current edge list.
pub fn run_trace<F>(initial: &Graph, mut rng: F) -> Trace
where
    F: FnMut() -> f64,
{
    let mut graph = initial.clone();
    let mut membership = Membership::new(&graph.nodes);
    let mut steps = vec![TraceStep::snapshot(&graph, "Initial graph")];

    while graph.node_count() > 2 && !graph.edges.is_empty() {
        let edge = graph.edges[pick_index(rng(), graph.edges.len())].clone();
        let (u, v) = (edge.source, edge.target);

        // highlight the chosen edge before its endpoints disappear
        steps.push(TraceStep {
            graph: graph.clone(),
            description: format!("Random edge selected: {} ({} - {})", edge.id, u, v),
            selected_edge_id: Some(edge.id),
            merge_pair: Some(MergePair {
                u: u.clone(),
                v: v.clone(),
            }),
            merged_nodes: None,
        });

        let (merged_id, removed_loops) = contract(&mut graph, &u, &v);
        membership.merge(&u, &v, &merged_id);
        debug!(
            "merged {} and {} into {}, removed {} loops, {} nodes and {} edges left",
            u,
            v,
            merged_id,
            removed_loops,
            graph.node_count(),
            graph.edge_count()
        );

        steps.push(TraceStep {
            graph: graph.clone(),
            description: format!("Merged {} + {} -> {}", u, v, merged_id),
            selected_edge_id: None,
            merge_pair: None,
            merged_nodes: Some((u, v)),
        });
    }

    let termination = match graph.node_count() {
        2 => Termination::Converged,
        n if n < 2 => Termination::TooFewNodes,
        n => Termination::EdgesExhausted { remaining_nodes: n },
    };

    let cut = match termination {
        Termination::Converged => Some(Cut::new(
            membership.members_of(&graph.nodes[0].id),
            membership.members_of(&graph.nodes[1].id),
            graph.edges.iter().map(|edge| edge.id.clone()).collect(),
        )),
        _ => None,
    };

    let description = match &cut {
        Some(cut) => format!("{}, cut size {}", termination.describe(), cut.size),
        None => termination.describe(),
    };
    steps.push(TraceStep::snapshot(&graph, description));

    info!(
        "contraction finished after {} merges: {:?}",
        (steps.len() - 2) / 2,
        termination
    );

    Trace::new(steps, termination, cut)
}
