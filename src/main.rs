mod app;
mod args;
mod ui;

use app::ViewerApp;
use clap::Parser;
use eframe::egui;
use web_summary_viewer::config::ViewerConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = args::Args::parse();
    let config = ViewerConfig::resolve(args.config.as_deref(), args.source)?;
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Web Summary Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(ViewerApp::new(cc.egui_ctx.clone(), config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer window: {e}"))
}
