//! Viewport rendering for `TreeViewApp`.
//!
//! egui pointer state is translated into [`PointerEvent`]s for the
//! controller, then the frame is planned and painted back-to-front.

use eframe::egui;
use log::debug;

use treeline_3d::interact::Mode;
use treeline_3d::render::paint::paint_frame;
use treeline_3d::render::plan_frame;
use treeline_3d::PointerEvent;

use super::TreeViewApp;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x2a, 0x31, 0x42);
const HINT_COLOR: egui::Color32 = egui::Color32::from_rgb(0xa0, 0xa8, 0xb8);

impl TreeViewApp {
    /// Allocate the whole central area and draw the scene into it.
    pub fn draw_view(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(
            ui.available_size(),
            egui::Sense::click_and_drag().union(egui::Sense::hover()),
        );
        let rect = response.rect;
        let center = rect.center();
        painter.rect_filled(rect, 0.0, BACKGROUND);

        // Project against this frame's rect so hit-tests match what was drawn.
        self.controller.scene_mut().update_projection(center.x, center.y);

        for event in pointer_events(ui, &response) {
            if let Some(update) = self.controller.handle(event) {
                debug!("drag finished: {update:?}");
                self.on_node_moved(update);
            }
        }
        if !response.hovered() && self.controller.mode() == Mode::Idle {
            self.controller.scene_mut().set_hovered(None);
        }

        self.controller.scene_mut().update_projection(center.x, center.y);
        let plan = plan_frame(self.controller.scene());
        paint_frame(&painter, &plan);

        let scene = self.controller.scene();
        if scene.is_empty() {
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                "Empty scene. Try 'demo' in the console.",
                egui::FontId::proportional(16.0),
                HINT_COLOR,
            );
        }
        painter.text(
            rect.left_bottom() + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            format!(
                "Drag: rotate | Drag node: move | Wheel: zoom ({:.0}%) | {} nodes",
                scene.camera.zoom * 100.0,
                scene.nodes().len()
            ),
            egui::FontId::proportional(11.0),
            HINT_COLOR,
        );

        if self.controller.mode() != Mode::Idle {
            ui.ctx().request_repaint();
        }
    }
}

/// Map this frame's egui pointer state onto controller events, in order.
fn pointer_events(ui: &egui::Ui, response: &egui::Response) -> Vec<PointerEvent> {
    let (pressed, released, pos, scroll) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.interact_pos().or(i.pointer.hover_pos()),
            i.raw_scroll_delta.y,
        )
    });

    let mut events = Vec::new();
    if let Some(p) = pos {
        if pressed && response.hovered() {
            events.push(PointerEvent::Press { x: p.x, y: p.y });
        } else {
            events.push(PointerEvent::Move { x: p.x, y: p.y });
        }
    }
    if released {
        events.push(PointerEvent::Release);
    }
    if response.hovered() && scroll.abs() > 0.1 {
        events.push(PointerEvent::Wheel { delta: scroll });
    }
    events
}
