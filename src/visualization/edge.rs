use egui::epaint::{QuadraticBezierShape, Shape};
use egui::{Color32, Pos2, Stroke};

use crate::visualization::curves::QuadCurve;

const DEFAULT: Color32 = Color32::from_rgb(0x4B, 0x55, 0x63);
const SELECTED: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);
const CUT: Color32 = Color32::from_rgb(0x90, 0xEE, 0x90);

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum EdgeRole {
    /// Edge picked for the next contraction
    Selected,
    /// Edge crossing the final two-way cut
    Cut,
    Other,
}

#[derive(Clone, Debug)]
pub(crate) struct EdgeShape {
    curve: QuadCurve,
    role: EdgeRole,
}

impl EdgeShape {
    pub(crate) fn new(curve: QuadCurve, role: EdgeRole) -> Self {
        Self { curve, role }
    }

    fn stroke(&self) -> Stroke {
        match self.role {
            EdgeRole::Selected => Stroke::new(4., SELECTED),
            EdgeRole::Cut => Stroke::new(3., CUT),
            EdgeRole::Other => Stroke::new(2., DEFAULT),
        }
    }

    pub(crate) fn shape(&self, origin: Pos2) -> Shape {
        let points = self.curve.points().map(|point| origin + point.to_vec2());
        QuadraticBezierShape::from_points_stroke(points, false, Color32::TRANSPARENT, self.stroke())
            .into()
    }
}
