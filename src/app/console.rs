//! Scene actions and the console panel for `TreeViewApp`.
//!
//! Covers loading (`show_demo`, `load_outline`, `reload_outline`), `reset_view`,
//! `save_positions` and the command line that drives all of them.

use std::path::PathBuf;

use eframe::egui;
use log::{info, warn};

use treeline_3d::command::Command;
use treeline_3d::scene::source::OutlineFile;
use treeline_3d::scene::{write_positions, LoadOutcome, PositionUpdate};

use super::TreeViewApp;

impl TreeViewApp {
    /// Replace the scene with the built-in demo hierarchy.
    pub fn show_demo(&mut self) {
        let summary = self.controller.load_demo();
        self.outline_path = None;
        self.log_message(format!(
            "Showing demo scene: {} nodes, {} connections",
            summary.nodes, summary.connections
        ));
    }

    /// Import an outline file; the demo stands in if it cannot be read.
    pub fn load_outline(&mut self, path: PathBuf) {
        let source = OutlineFile::new(path.clone());
        match self.controller.load_source(&source) {
            LoadOutcome::Loaded(summary) => {
                self.log_message(format!(
                    "Loaded {}: {} nodes, {} connections",
                    path.display(),
                    summary.nodes,
                    summary.connections
                ));
                self.outline_path = Some(path);
            }
            LoadOutcome::FellBackToDemo(_) => {
                self.log_message(format!(
                    "Could not load {}; showing demo scene",
                    path.display()
                ));
                self.outline_path = None;
            }
        }
    }

    /// Re-read the outline currently shown, picking up edits made on disk.
    pub fn reload_outline(&mut self) {
        match self.outline_path.clone() {
            Some(path) => self.load_outline(path),
            None => self.log_message("Nothing to reload: showing the demo scene"),
        }
    }

    /// Camera back to defaults, then a fresh demo scene.
    pub fn reset_view(&mut self) {
        self.controller.scene_mut().reset_camera();
        self.show_demo();
        self.log_message("View reset");
    }

    /// Write every node position to the configured positions file.
    pub fn save_positions(&mut self) {
        let updates = self.controller.scene().position_updates();
        let path = self.controller.scene().config.positions_file.clone();
        match write_positions(&path, &updates) {
            Ok(()) => {
                info!("saved {} positions to {}", updates.len(), path.display());
                self.log_message(format!(
                    "Saved {} positions to {}",
                    updates.len(),
                    path.display()
                ));
            }
            Err(e) => {
                warn!("{e}");
                self.log_message(format!("Save failed: {e}"));
            }
        }
    }

    /// Report a node moved by a finished drag.
    pub fn on_node_moved(&mut self, update: PositionUpdate) {
        self.log_message(format!(
            "Moved {} to ({:.0}, {:.0}, {:.0})",
            update.node_id, update.x, update.y, update.z
        ));
    }

    /// Parse and run one console line.
    pub fn execute_command(&mut self, line: &str) {
        let command = match line.parse::<Command>() {
            Ok(c) => c,
            Err(e) => {
                self.log_message(e.to_string());
                return;
            }
        };
        self.log_message(format!("> {command}"));
        match command {
            Command::Help => self.log_message(Command::HELP),
            Command::Demo => self.show_demo(),
            Command::Reset => self.reset_view(),
            Command::Clear => self.log.clear(),
            Command::Save => self.save_positions(),
            Command::Reload => self.reload_outline(),
            Command::Load(path) => {
                self.load_path_input = path.display().to_string();
                self.load_outline(path);
            }
        }
    }

    // ── Panel ────────────────────────────────────────────────────────────────

    pub fn draw_console(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(">");
            let response = ui.add_sized(
                [ui.available_width() - 60.0, 22.0],
                egui::TextEdit::singleline(&mut self.command_input)
                    .hint_text("help, demo, reset, clear, save, reload, load <path>")
                    .font(egui::TextStyle::Monospace),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (submitted || ui.button("Run").clicked()) && !self.command_input.trim().is_empty() {
                let line = std::mem::take(&mut self.command_input);
                self.execute_command(&line);
                response.request_focus();
            }
        });

        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.log {
                    ui.label(egui::RichText::new(line).monospace().size(12.0));
                }
            });
    }
}
