//! Toolbar rendering for `TreeViewApp`.
//!
//! Draws the rotation and zoom sliders, the scene buttons and the
//! selected-node readout.

use eframe::egui;
use treeline_3d::camera::{angle_from_slider, slider_from_angle, slider_from_zoom, zoom_from_slider};

use super::TreeViewApp;

impl TreeViewApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            // Camera sliders mirror the camera every frame so pointer
            // rotation and wheel zoom stay in sync with them.
            {
                let camera = &mut self.controller.scene_mut().camera;

                let mut rx = slider_from_angle(camera.rx);
                if ui
                    .add(egui::Slider::new(&mut rx, -100.0..=100.0).text("Rotate X"))
                    .changed()
                {
                    camera.rx = angle_from_slider(rx);
                }

                let mut ry = slider_from_angle(camera.ry);
                if ui
                    .add(egui::Slider::new(&mut ry, -100.0..=100.0).text("Rotate Y"))
                    .changed()
                {
                    camera.ry = angle_from_slider(ry);
                }

                let mut zoom = slider_from_zoom(camera.zoom);
                if ui
                    .add(egui::Slider::new(&mut zoom, 10.0..=300.0).text("Zoom %"))
                    .changed()
                {
                    camera.zoom = zoom_from_slider(zoom);
                }
            }

            ui.separator();

            if ui.button("Demo").clicked() {
                self.show_demo();
            }
            if ui.button("Reset").clicked() {
                self.reset_view();
            }
            if ui.button("Save").on_hover_text("Write node positions").clicked() {
                self.save_positions();
            }

            ui.separator();

            let response = ui.add_sized(
                [180.0, 22.0],
                egui::TextEdit::singleline(&mut self.load_path_input)
                    .hint_text("outline.json")
                    .font(egui::TextStyle::Monospace),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let has_path = !self.load_path_input.trim().is_empty();
            if (ui.add_enabled(has_path, egui::Button::new("Load")).clicked() || submitted) && has_path {
                let path = self.load_path_input.trim().into();
                self.load_outline(path);
            }

            if ui
                .add_enabled(self.outline_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                self.reload_outline();
            }

            ui.toggle_value(&mut self.show_log, "Console");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(4.0);
                match self.controller.scene().selected_node() {
                    Some(node) => ui.label(format!("Selected: {}", node.title)),
                    None => ui.weak("Nothing selected"),
                };
            });
        });
    }
}
