mod app;
mod curves;
mod edge;
mod gesture;
mod interaction;
mod node;
mod player;

use anyhow::anyhow;
use eframe::run_native;
use egui::{Style, Visuals};

use crate::config::Settings;
use crate::visualization::app::ContractionApp;

pub fn draw_app(settings: Settings) -> anyhow::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([880.0, 640.0]),
        ..Default::default()
    };
    run_native(
        "Contraction Playground",
        native_options,
        Box::new(|cc| {
            // Set to dark mode always
            let style = Style {
                visuals: Visuals::dark(),
                ..Style::default()
            };
            cc.egui_ctx.set_style(style);
            Box::new(ContractionApp::new(settings, cc))
        }),
    )
    .map_err(|err| anyhow!("failed to open the window: {}", err))
}
