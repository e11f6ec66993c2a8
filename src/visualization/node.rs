use egui::epaint::{CircleShape, FontFamily, FontId, Shape, Stroke, TextShape};
use egui::{Color32, Context, Pos2};

use crate::graph::Node;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum NodeKind {
    /// Endpoint of the edge about to be contracted
    Merging,
    /// First endpoint of an edge being drawn by hand
    PendingSource,
    Other,
}

struct NodeColor;

impl NodeColor {
    const OTHER: Color32 = Color32::from_rgb(0x0E, 0xA5, 0xE9);
    const OTHER_INTERACTED: Color32 = Color32::from_rgb(0x38, 0xBD, 0xF8);
    const MERGING: Color32 = Color32::from_rgb(0xEA, 0xB3, 0x08);
    const MERGING_INTERACTED: Color32 = Color32::from_rgb(0xFA, 0xCC, 0x15);
    const PENDING: Color32 = Color32::from_rgb(0x22, 0xC5, 0x5E);
    const OUTLINE: Color32 = Color32::from_rgb(0xE5, 0xE7, 0xEB);

    fn get_color(kind: NodeKind, is_interacted: bool) -> Color32 {
        match (kind, is_interacted) {
            (NodeKind::Merging, true) => Self::MERGING_INTERACTED,
            (NodeKind::Merging, false) => Self::MERGING,
            (NodeKind::PendingSource, _) => Self::PENDING,
            (NodeKind::Other, true) => Self::OTHER_INTERACTED,
            (NodeKind::Other, false) => Self::OTHER,
        }
    }
}

/// Shortens long merged ids for display, the id itself is left alone
pub(crate) fn display_label(id: &str, max_chars: usize) -> String {
    if id.chars().count() <= max_chars {
        return id.to_string();
    }
    let kept: String = id.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[derive(Clone, Debug)]
pub(crate) struct NodeShape {
    pos: Pos2,
    label_text: String,
    dragged: bool,

    radius: f32,
    kind: NodeKind,
}

impl NodeShape {
    pub(crate) fn new(node: &Node, radius: f32, label_max_chars: usize) -> Self {
        Self {
            pos: node.pos(),
            label_text: display_label(&node.id, label_max_chars),
            dragged: false,
            radius,
            kind: NodeKind::Other,
        }
    }

    pub(crate) fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub(crate) fn with_dragged(mut self, dragged: bool) -> Self {
        self.dragged = dragged;
        self
    }

    /// Slides the node toward `target` while shrinking it, `t` runs from 0 to 1
    pub(crate) fn collapse_toward(mut self, target: Pos2, t: f32) -> Self {
        let t = t.clamp(0., 1.);
        self.pos = self.pos.lerp(target, t);
        self.radius *= 1. - t;
        self
    }

    pub(crate) fn is_inside(&self, pos: Pos2) -> bool {
        is_inside_circle(self.pos, self.radius, pos)
    }

    /// Shapes in screen space, `origin` is where graph coordinate (0, 0) lands
    pub(crate) fn shapes(&self, ctx: &Context, origin: Pos2) -> Vec<Shape> {
        let mut res = Vec::with_capacity(2);

        let color = NodeColor::get_color(self.kind, self.dragged);
        let circle_center = origin + self.pos.to_vec2();
        let circle_shape = CircleShape {
            center: circle_center,
            radius: self.radius,
            fill: color,
            stroke: Stroke::new(2., NodeColor::OUTLINE),
        };
        res.push(circle_shape.into());

        // nothing readable fits into a collapsing node
        if self.radius < 8. {
            return res;
        }

        let white = Color32::WHITE;
        let galley = ctx.fonts(|f| {
            f.layout_no_wrap(
                self.label_text.clone(),
                FontId::new(12., FontFamily::Proportional),
                white,
            )
        });

        // display label in the middle of the circle
        let label_pos = Pos2::new(
            circle_center.x - galley.size().x / 2.,
            circle_center.y - galley.size().y / 2.,
        );

        res.push(TextShape::new(label_pos, galley, white).into());

        res
    }
}

fn is_inside_circle(center: Pos2, radius: f32, pos: Pos2) -> bool {
    let dir = pos - center;
    dir.length() <= radius
}

#[cfg(test)]
mod tests {
    use egui::Pos2;

    use crate::graph::Node;
    use crate::visualization::node::{display_label, NodeShape};

    #[test]
    fn short_labels_are_kept() {
        assert_eq!("1_2", display_label("1_2", 7));
        assert_eq!("1_2_3_4", display_label("1_2_3_4", 7));
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!("1_2_3_…", display_label("1_2_3_4_5", 7));
        assert_eq!(7, display_label("10_11_12_13", 7).chars().count());
    }

    #[test]
    fn hit_test_uses_radius() {
        let shape = NodeShape::new(&Node::new("1", 50., 50.), 18., 7);
        assert!(shape.is_inside(Pos2::new(60., 60.)));
        assert!(!shape.is_inside(Pos2::new(65., 65.)));
    }

    #[test]
    fn collapse_moves_and_shrinks() {
        let shape = NodeShape::new(&Node::new("1", 0., 0.), 18., 7);
        let half = shape.clone().collapse_toward(Pos2::new(20., 0.), 0.5);
        assert_eq!(Pos2::new(10., 0.), half.pos);
        assert_eq!(9., half.radius);

        let done = shape.collapse_toward(Pos2::new(20., 0.), 3.);
        assert_eq!(Pos2::new(20., 0.), done.pos);
        assert_eq!(0., done.radius);
    }
}
