mod app;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use log::{info, warn};

use treeline_3d::ViewConfig;

use crate::app::TreeViewApp;

/// Interactive 3D view of an outline hierarchy.
#[derive(Parser, Debug)]
#[command(name = "treeline-3d", version, about)]
struct Cli {
    /// Outline JSON to show (the demo scene is used when omitted)
    outline: Option<PathBuf>,

    /// View configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for random layout and colors
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ViewConfig::from_file(path).unwrap_or_else(|e| {
            warn!("{e}; using default view settings");
            ViewConfig::default()
        }),
        None => ViewConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    info!("starting treeline-3d (seed: {:?})", config.seed);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    let outline = cli.outline;
    let result = eframe::run_native(
        "TreeLine 3D",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(TreeViewApp::new(config, outline)))
        }),
    );
    if let Err(e) = result {
        log::error!("window failed: {e}");
        std::process::exit(1);
    }
}
