//! `TreeViewApp`: the top-level egui application state.
//!
//! This module declares the `TreeViewApp` struct and its constructor.
//! All methods are split across the sibling sub-modules:
//!
//! - `console`: scene loading, saving, status log and command line
//! - `toolbar`: rotation/zoom sliders and action buttons
//! - `content`: the 3D viewport (pointer input + painting)

pub mod console;
pub mod content;
pub mod toolbar;

use std::path::PathBuf;

use eframe::egui;
use treeline_3d::{SceneState, ViewConfig, ViewController};

/// Oldest lines are dropped past this many.
const LOG_CAPACITY: usize = 200;

// ─── Application state ───────────────────────────────────────────────────────

pub struct TreeViewApp {
    pub controller: ViewController,
    /// Outline currently shown, re-read by "Reload" (`None` for the demo)
    pub outline_path: Option<PathBuf>,
    pub load_path_input: String,
    pub command_input: String,
    pub log: Vec<String>,
    pub show_log: bool,
}

impl TreeViewApp {
    pub fn new(config: ViewConfig, outline: Option<PathBuf>) -> Self {
        let mut app = Self {
            controller: ViewController::new(SceneState::new(config)),
            load_path_input: outline
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            outline_path: None,
            command_input: String::new(),
            log: Vec::new(),
            show_log: true,
        };
        app.log_message("3D view initialized. Type 'help' for commands.");
        match outline {
            Some(path) => app.load_outline(path),
            None => app.show_demo(),
        }
        app
    }

    pub fn log_message(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }
}

// ─── eframe integration ──────────────────────────────────────────────────────

impl eframe::App for TreeViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        if self.show_log {
            egui::TopBottomPanel::bottom("console")
                .resizable(true)
                .default_height(140.0)
                .show(ctx, |ui| {
                    self.draw_console(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_view(ui);
        });
    }
}
