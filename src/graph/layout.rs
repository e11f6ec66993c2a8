use std::f32::consts::TAU;

use egui::Pos2;

use crate::graph::Node;

/// Circle on which freshly generated nodes are placed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleLayout {
    pub center: Pos2,
    pub radius: f32,
}

impl Default for CircleLayout {
    fn default() -> Self {
        Self {
            center: Pos2::new(400., 250.),
            radius: 220.,
        }
    }
}

/// Places `node_count` nodes evenly on the circle, node `i` (counting from 1) at angle `TAU * i / node_count`.
///
/// Node ids are `"1"` to `"node_count"`. No edges are created.
pub fn generate_layout(node_count: usize, circle: &CircleLayout) -> Vec<Node> {
    (1..=node_count)
        .map(|i| {
            let angle = TAU * i as f32 / node_count as f32;
            Node::new(
                i.to_string(),
                circle.center.x + circle.radius * angle.cos(),
                circle.center.y + circle.radius * angle.sin(),
            )
        })
        .collect()
}
