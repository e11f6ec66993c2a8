use std::collections::HashMap;

use egui::{Pos2, Vec2};

use crate::graph::{Edge, Graph, NodeId};

/// Quadratic Bézier from `from` through `ctrl` to `to`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCurve {
    pub from: Pos2,
    pub ctrl: Pos2,
    pub to: Pos2,
}

impl QuadCurve {
    pub fn points(&self) -> [Pos2; 3] {
        [self.from, self.ctrl, self.to]
    }

    #[cfg(test)]
    pub fn point_at(&self, t: f32) -> Pos2 {
        let a = self.from.lerp(self.ctrl, t);
        let b = self.ctrl.lerp(self.to, t);
        a.lerp(b, t)
    }
}

/// Edge together with its rank among the edges sharing the same unordered endpoint pair
#[derive(Clone, Debug, PartialEq)]
pub struct CurvedEdge {
    pub edge: Edge,
    pub parallel_index: usize,
    pub parallel_count: usize,
    /// `None` while an endpoint has no known position
    pub curve: Option<QuadCurve>,
}

impl CurvedEdge {
    /// Signed rank centred on the straight line, e.g. -1, 0, 1 for three parallel edges
    pub fn offset_index(&self) -> f32 {
        self.parallel_index as f32 - (self.parallel_count as f32 - 1.) / 2.
    }

    fn recompute(&mut self, positions: &HashMap<NodeId, Pos2>, offset: f32) {
        let offset_index = self.offset_index();
        self.curve = match (
            positions.get(&self.edge.source),
            positions.get(&self.edge.target),
        ) {
            (Some(&from), Some(&to)) => Some(bend(
                &self.edge.source,
                from,
                &self.edge.target,
                to,
                offset_index * offset,
            )),
            _ => None,
        };
    }
}

/// Order-independent key of an endpoint pair
pub fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Curve from `from` to `to` whose control point sits `displacement` away from the midpoint.
///
/// The normal is taken from the canonical direction of the pair so that an edge stored
/// as `b -> a` bends to the same side as one stored as `a -> b`.
fn bend(source: &str, from: Pos2, target: &str, to: Pos2, displacement: f32) -> QuadCurve {
    let (start, end) = if canonical_pair(source, target).0 == source {
        (from, to)
    } else {
        (to, from)
    };
    let delta = end - start;
    let length = match delta.length() {
        len if len > 0. => len,
        _ => 1.,
    };
    let normal = Vec2::new(-delta.y / length, delta.x / length);
    let midpoint = from.lerp(to, 0.5);

    QuadCurve {
        from,
        ctrl: midpoint + normal * displacement,
        to,
    }
}

/// Groups parallel edges and assigns each a symmetric curvature offset.
///
/// Groups appear in the order their first edge appears in `graph.edges`; inside a group
/// the first edge gets `parallel_index` 0.
pub fn layout_curves(
    graph: &Graph,
    positions: &HashMap<NodeId, Pos2>,
    offset: f32,
) -> Vec<CurvedEdge> {
    let mut group_of: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<Vec<&Edge>> = vec![];

    for edge in &graph.edges {
        let key = canonical_pair(&edge.source, &edge.target);
        let group = *group_of.entry(key).or_insert_with(|| {
            groups.push(vec![]);
            groups.len() - 1
        });
        groups[group].push(edge);
    }

    groups
        .into_iter()
        .flat_map(|group| {
            let count = group.len();
            group
                .into_iter()
                .enumerate()
                .map(move |(index, edge)| (edge, index, count))
        })
        .map(|(edge, parallel_index, parallel_count)| {
            let mut curved = CurvedEdge {
                edge: edge.clone(),
                parallel_index,
                parallel_count,
                curve: None,
            };
            curved.recompute(positions, offset);
            curved
        })
        .collect()
}

/// Laid-out curves of one displayed graph, with per-node incidence for cheap updates while dragging
#[derive(Clone, Debug, Default)]
pub struct EdgeCurves {
    offset: f32,
    curves: Vec<CurvedEdge>,
    incident: HashMap<NodeId, Vec<usize>>,
}

impl EdgeCurves {
    pub fn new(graph: &Graph, positions: &HashMap<NodeId, Pos2>, offset: f32) -> Self {
        let curves = layout_curves(graph, positions, offset);
        let mut incident: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (i, curved) in curves.iter().enumerate() {
            incident.entry(curved.edge.source.clone()).or_default().push(i);
            if curved.edge.target != curved.edge.source {
                incident.entry(curved.edge.target.clone()).or_default().push(i);
            }
        }

        Self {
            offset,
            curves,
            incident,
        }
    }

    pub fn curves(&self) -> &[CurvedEdge] {
        &self.curves
    }

    /// Recomputes only the curves touching `node` and returns how many were touched.
    pub fn update_node(&mut self, node: &str, positions: &HashMap<NodeId, Pos2>) -> usize {
        let Some(indices) = self.incident.get(node) else {
            return 0;
        };
        for &i in indices {
            self.curves[i].recompute(positions, self.offset);
        }
        indices.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use egui::Pos2;
    use proptest::prelude::*;

    use crate::graph::{Edge, Graph, Node, NodeId};
    use crate::visualization::curves::{canonical_pair, layout_curves, EdgeCurves};

    const OFFSET: f32 = 30.;

    fn triangle_with_parallels() -> Graph {
        Graph {
            nodes: vec![
                Node::new("a", 0., 0.),
                Node::new("b", 100., 0.),
                Node::new("c", 50., 80.),
            ],
            edges: vec![
                Edge::new("e1", "a", "b"),
                Edge::new("e2", "b", "c"),
                Edge::new("e3", "b", "a"),
                Edge::new("e4", "a", "b"),
                Edge::new("e5", "c", "a"),
            ],
        }
    }

    fn close(a: Pos2, b: Pos2) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn canonical_pair_ignores_order() {
        assert_eq!(("1", "2"), canonical_pair("2", "1"));
        assert_eq!(("1", "2"), canonical_pair("1", "2"));
        assert_eq!(("1_2", "3"), canonical_pair("3", "1_2"));
    }

    #[test]
    fn parallel_edges_share_a_group_in_insertion_order() {
        let graph = triangle_with_parallels();
        let curves = layout_curves(&graph, &graph.positions(), OFFSET);

        let summary: Vec<(&str, usize, usize)> = curves
            .iter()
            .map(|c| (c.edge.id.as_str(), c.parallel_index, c.parallel_count))
            .collect();
        assert_eq!(
            vec![
                ("e1", 0, 3),
                ("e3", 1, 3),
                ("e4", 2, 3),
                ("e2", 0, 1),
                ("e5", 0, 1)
            ],
            summary
        );
        assert_eq!(-1., curves[0].offset_index());
        assert_eq!(0., curves[1].offset_index());
        assert_eq!(1., curves[2].offset_index());
    }

    #[test]
    fn single_edge_is_straight() {
        let graph = triangle_with_parallels();
        let curves = layout_curves(&graph, &graph.positions(), OFFSET);
        let curve = curves[3].curve.unwrap();

        assert!(close(curve.from.lerp(curve.to, 0.5), curve.ctrl));
        assert!(close(Pos2::new(75., 40.), curve.point_at(0.5)));
    }

    #[test]
    fn parallel_curves_fan_out_symmetrically() {
        let graph = triangle_with_parallels();
        let curves = layout_curves(&graph, &graph.positions(), OFFSET);
        let ctrl: Vec<Pos2> = curves[..3].iter().map(|c| c.curve.unwrap().ctrl).collect();
        let midpoint = Pos2::new(50., 0.);

        // "e3" is stored reversed but still takes the middle slot
        assert!(close(midpoint, ctrl[1]));
        assert!(close(Pos2::new(50., -30.), ctrl[0]));
        assert!(close(Pos2::new(50., 30.), ctrl[2]));
    }

    #[test]
    fn reversed_edge_bends_away_from_its_twin() {
        let graph = Graph {
            nodes: vec![Node::new("1", 0., 0.), Node::new("2", 0., 60.)],
            edges: vec![Edge::new("e1", "1", "2"), Edge::new("e2", "2", "1")],
        };
        let curves = layout_curves(&graph, &graph.positions(), OFFSET);
        let first = curves[0].curve.unwrap();
        let second = curves[1].curve.unwrap();

        assert!(first.ctrl.distance(second.ctrl) > OFFSET - 1e-3);
        assert!(close(first.ctrl.lerp(second.ctrl, 0.5), Pos2::new(0., 30.)));
    }

    #[test]
    fn coincident_endpoints_stay_finite() {
        let graph = Graph {
            nodes: vec![Node::new("1", 5., 5.), Node::new("2", 5., 5.)],
            edges: vec![Edge::new("e1", "1", "2"), Edge::new("e2", "1", "2")],
        };
        for curved in layout_curves(&graph, &graph.positions(), OFFSET) {
            let curve = curved.curve.unwrap();
            assert!(curve.points().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn missing_position_leaves_curve_empty() {
        let graph = triangle_with_parallels();
        let mut positions = graph.positions();
        positions.remove("c");
        let curves = layout_curves(&graph, &positions, OFFSET);

        assert!(curves[0].curve.is_some());
        assert!(curves[3].curve.is_none());
        assert!(curves[4].curve.is_none());
    }

    #[test]
    fn dragging_updates_only_incident_curves() {
        let mut graph = triangle_with_parallels();
        graph.nodes.push(Node::new("d", 200., 200.));
        graph.edges.push(Edge::new("e6", "a", "d"));

        let mut positions: HashMap<NodeId, Pos2> = graph.positions();
        let mut curves = EdgeCurves::new(&graph, &positions, OFFSET);
        let before = curves.curves().to_vec();

        positions.insert("c".to_string(), Pos2::new(10., 300.));
        assert_eq!(2, curves.update_node("c", &positions));

        for (old, new) in before.iter().zip(curves.curves()) {
            if old.edge.touches("c") {
                assert_ne!(old.curve, new.curve);
            } else {
                assert_eq!(old, new);
            }
        }

        let fresh = layout_curves(&graph, &positions, OFFSET);
        assert_eq!(fresh.as_slice(), curves.curves());

        assert_eq!(0, curves.update_node("zz", &positions));
    }

    proptest! {
        #[test]
        fn group_offsets_sum_to_zero(count in 1usize..12) {
            let graph = Graph {
                nodes: vec![Node::new("x", 0., 0.), Node::new("y", 40., 40.)],
                edges: (0..count)
                    .map(|i| if i % 2 == 0 {
                        Edge::new(format!("e{}", i), "x", "y")
                    } else {
                        Edge::new(format!("e{}", i), "y", "x")
                    })
                    .collect(),
            };
            let curves = layout_curves(&graph, &graph.positions(), OFFSET);

            let mut indices: Vec<usize> = curves.iter().map(|c| c.parallel_index).collect();
            indices.sort_unstable();
            prop_assert_eq!((0..count).collect::<Vec<_>>(), indices);

            let sum: f32 = curves.iter().map(|c| c.offset_index()).sum();
            prop_assert!(sum.abs() < 1e-4);

            let mid = Pos2::new(20., 20.);
            let centroid = curves
                .iter()
                .map(|c| c.curve.unwrap().ctrl.to_vec2())
                .fold(egui::Vec2::ZERO, |acc, v| acc + v)
                / count as f32;
            prop_assert!(mid.distance(centroid.to_pos2()) < 1e-3);
        }
    }
}
