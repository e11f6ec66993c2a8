mod config;
mod contraction;
mod graph;
mod visualization;

use clap::Parser;

use crate::config::{Args, Settings};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = Settings::from_args(&args)?;
    log::info!(
        "starting with {} nodes, edge probability {:.2}",
        settings.node_count,
        settings.edge_probability
    );

    visualization::draw_app(settings)
}
