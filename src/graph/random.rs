use itertools::Itertools;
use rand::Rng;

use crate::graph::{Edge, GraphError, Node};

/// Erdős–Rényi edges: every unordered pair of `nodes` is connected independently with `probability`.
pub fn random_edges<R: Rng>(
    nodes: &[Node],
    probability: f64,
    rng: &mut R,
) -> Result<Vec<Edge>, GraphError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(GraphError::InvalidProbability(probability));
    }

    let edges = nodes
        .iter()
        .tuple_combinations()
        .filter(|_| rng.gen_bool(probability))
        .enumerate()
        .map(|(i, (a, b))| Edge::new(format!("e{}", i + 1), a.id.clone(), b.id.clone()))
        .collect();

    Ok(edges)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::graph::{generate_layout, random_edges, CircleLayout, Graph, GraphError};

    #[test]
    fn probability_bounds() {
        let nodes = generate_layout(5, &CircleLayout::default());
        let mut rng = StdRng::seed_from_u64(7);

        assert!(random_edges(&nodes, 0.0, &mut rng).unwrap().is_empty());
        assert_eq!(10, random_edges(&nodes, 1.0, &mut rng).unwrap().len());
        assert_eq!(
            Err(GraphError::InvalidProbability(1.5)),
            random_edges(&nodes, 1.5, &mut rng)
        );
    }

    #[test]
    fn generated_graph_is_valid_and_simple() {
        let nodes = generate_layout(12, &CircleLayout::default());
        let mut rng = StdRng::seed_from_u64(42);
        let edges = random_edges(&nodes, 0.4, &mut rng).unwrap();

        for (i, edge) in edges.iter().enumerate() {
            assert_eq!(format!("e{}", i + 1), edge.id);
            assert!(edges[..i].iter().all(|other| {
                !(other.touches(&edge.source) && other.touches(&edge.target))
            }));
        }

        let graph = Graph { nodes, edges };
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn same_seed_same_edges() {
        let nodes = generate_layout(8, &CircleLayout::default());
        let first = random_edges(&nodes, 0.5, &mut StdRng::seed_from_u64(3)).unwrap();
        let second = random_edges(&nodes, 0.5, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(first, second);
    }
}
