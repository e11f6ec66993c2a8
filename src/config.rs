use std::time::Duration;

use clap::Parser;
use egui::Vec2;

use crate::graph::{CircleLayout, GraphError};

pub const MIN_NODES: usize = 2;
pub const MAX_NODES: usize = 20;

#[derive(Debug, Parser)]
#[command(author, version, about = "Step through randomized min-cut contraction on small multigraphs")]
pub struct Args {
    /// Number of nodes placed on the circle
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(MIN_NODES as i64..=MAX_NODES as i64))]
    pub nodes: u8,

    /// Probability of each node pair being connected by "Random edges"
    #[arg(long, default_value_t = 0.4)]
    pub edge_probability: f64,

    /// Seed for reproducible runs, entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 500)]
    pub autoplay_delay_ms: u64,
}

/// Click vs. drag thresholds of the pointer controller
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickThresholds {
    pub max_distance: f32,
    pub max_elapsed: Duration,
}

impl Default for ClickThresholds {
    fn default() -> Self {
        Self {
            max_distance: 5.,
            max_elapsed: Duration::from_millis(300),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub node_count: usize,
    pub edge_probability: f64,
    pub seed: Option<u64>,
    pub layout: CircleLayout,
    pub canvas_size: Vec2,
    pub node_radius: f32,
    pub curve_offset: f32,
    pub click: ClickThresholds,
    pub autoplay_delay: Duration,
    pub merge_animation: Duration,
    pub label_max_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            node_count: 6,
            edge_probability: 0.4,
            seed: None,
            layout: CircleLayout::default(),
            canvas_size: Vec2::new(800., 500.),
            node_radius: 18.,
            curve_offset: 30.,
            click: ClickThresholds::default(),
            autoplay_delay: Duration::from_millis(500),
            merge_animation: Duration::from_millis(500),
            label_max_chars: 7,
        }
    }
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self, GraphError> {
        if !(0.0..=1.0).contains(&args.edge_probability) {
            return Err(GraphError::InvalidProbability(args.edge_probability));
        }

        Ok(Self {
            node_count: (args.nodes as usize).clamp(MIN_NODES, MAX_NODES),
            edge_probability: args.edge_probability,
            seed: args.seed,
            autoplay_delay: Duration::from_millis(args.autoplay_delay_ms),
            ..Self::default()
        })
    }
}
