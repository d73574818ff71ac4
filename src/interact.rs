//! Pointer interaction: rotate the camera, pick, hover and drag nodes.
//!
//! State machine:
//!
//! ```text
//!            press on node            release
//!   Idle ───────────────────► Dragging ───────► Idle
//!     │      press elsewhere          release
//!     └─────────────────────► Rotating ───────► Idle
//! ```
//!
//! Hover is a flag on the scene, refreshed on every move while idle.
//! Wheel events zoom in any state.
//!
//! Hit-testing walks nodes near → far over the footprints cached by the
//! last [`SceneState::update_projection`], the same rectangles the renderer
//! draws, so the nearest visible box under the pointer always wins.

use log::debug;

use crate::render::{depth_factor, front_to_back, Footprint};
use crate::scene::source::HierarchySource;
use crate::scene::{LoadOutcome, LoadSummary, NodeRecord, PositionUpdate, SceneState, Vec3};

/// Raw pointer input in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Release,
    /// Positive zooms in
    Wheel { delta: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Rotating,
    Dragging { node: usize },
}

/// Nearest node whose projected face contains `(x, y)`.
pub fn hit_test(scene: &SceneState, x: f32, y: f32) -> Option<usize> {
    let p = egui::pos2(x, y);
    let nodes = scene.nodes();
    front_to_back(nodes).into_iter().find(|&i| {
        let node = &nodes[i];
        node.projected.in_front() && Footprint::of(node, scene.camera.zoom, &scene.config).face.contains(p)
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ViewController
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Owns the scene and turns pointer events into scene changes.
#[derive(Debug)]
pub struct ViewController {
    scene: SceneState,
    mode: Mode,
    last_pointer: Option<[f32; 2]>,
    /// Pointer travel since the press that started the drag
    drag_travel: [f32; 2],
    /// World units per pointer pixel for the current drag
    drag_scale: f32,
}

impl ViewController {
    pub fn new(scene: SceneState) -> Self {
        Self {
            scene,
            mode: Mode::Idle,
            last_pointer: None,
            drag_travel: [0.0, 0.0],
            drag_scale: 0.0,
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.scene
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    // ── Loading (drops any in-flight gesture) ──

    pub fn load_records(&mut self, records: Vec<NodeRecord>) -> LoadSummary {
        self.abandon_gesture();
        self.scene.load_records(records)
    }

    pub fn load_demo(&mut self) -> LoadSummary {
        self.abandon_gesture();
        self.scene.load_demo()
    }

    pub fn load_source(&mut self, source: &dyn HierarchySource) -> LoadOutcome {
        self.abandon_gesture();
        self.scene.load_source(source)
    }

    fn abandon_gesture(&mut self) {
        self.mode = Mode::Idle;
        self.last_pointer = None;
        self.drag_travel = [0.0, 0.0];
        self.scene.clear_transient();
    }

    // ── Events ──

    /// Feed one pointer event. A drag release yields the node's new
    /// position for the host to persist.
    pub fn handle(&mut self, event: PointerEvent) -> Option<PositionUpdate> {
        match event {
            PointerEvent::Press { x, y } => {
                self.press(x, y);
                None
            }
            PointerEvent::Move { x, y } => {
                self.pointer_move(x, y);
                None
            }
            PointerEvent::Release => self.release(),
            PointerEvent::Wheel { delta } => {
                self.zoom_by(delta);
                None
            }
        }
    }

    fn press(&mut self, x: f32, y: f32) {
        if self.mode != Mode::Idle {
            // lost release
            self.release();
        }
        self.last_pointer = Some([x, y]);
        self.drag_travel = [0.0, 0.0];

        match hit_test(&self.scene, x, y) {
            Some(idx) => {
                self.scene.select(Some(idx));
                let zoom = self.scene.camera.zoom;
                let k = self.scene.config.depth_constant;
                let sensitivity = self.scene.config.drag_sensitivity;
                if let Some(node) = self.scene.node_mut(idx) {
                    node.drag_anchor = node.position;
                    node.dragging = true;
                    let df = depth_factor(node.projected.depth, k);
                    self.drag_scale = sensitivity / (df * zoom);
                    debug!("press on {}: dragging", node.id);
                }
                self.mode = Mode::Dragging { node: idx };
            }
            None => {
                self.scene.select(None);
                self.mode = Mode::Rotating;
                debug!("press on empty space: rotating");
            }
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        let [dx, dy] = match self.last_pointer {
            Some([lx, ly]) => [x - lx, y - ly],
            None => [0.0, 0.0],
        };
        self.last_pointer = Some([x, y]);

        match self.mode {
            Mode::Dragging { node } => {
                self.drag_travel[0] += dx;
                self.drag_travel[1] += dy;
                // screen right → camera +x, screen up → camera +z (away)
                let cam_dx = self.drag_travel[0] * self.drag_scale;
                let cam_dz = -self.drag_travel[1] * self.drag_scale;
                let (wx, wz) = self.scene.camera.unrotate_yaw(cam_dx, cam_dz);
                if let Some(n) = self.scene.node_mut(node) {
                    n.position = n.drag_anchor + Vec3::new(wx, 0.0, wz);
                }
            }
            Mode::Rotating => {
                let s = self.scene.config.rotate_sensitivity;
                self.scene.camera.ry += dx * s;
                self.scene.camera.rx += dy * s;
            }
            Mode::Idle => {
                let hit = hit_test(&self.scene, x, y);
                self.scene.set_hovered(hit);
            }
        }
    }

    fn release(&mut self) -> Option<PositionUpdate> {
        let mode = std::mem::replace(&mut self.mode, Mode::Idle);
        self.last_pointer = None;
        match mode {
            Mode::Dragging { node } => {
                let n = self.scene.node_mut(node)?;
                n.dragging = false;
                debug!("released {} at ({:.1}, {:.1}, {:.1})", n.id, n.position.x, n.position.y, n.position.z);
                self.scene.position_update(node)
            }
            Mode::Rotating | Mode::Idle => None,
        }
    }

    fn zoom_by(&mut self, delta: f32) {
        let cfg = &self.scene.config;
        let zoom = self.scene.camera.zoom * (1.0 + delta / cfg.wheel_divisor);
        self.scene.camera.zoom = cfg.clamp_zoom(zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::scene::NodeId;
    use approx::assert_abs_diff_eq;

    const CX: f32 = 400.0;
    const CY: f32 = 300.0;

    fn demo_controller() -> ViewController {
        let mut c = ViewController::new(SceneState::new(ViewConfig::default().with_seed(11)));
        c.load_demo();
        c.scene_mut().update_projection(CX, CY);
        c
    }

    fn placed(positions: &[(f32, f32, f32)]) -> ViewController {
        let records = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y, z))| {
                let mut r = NodeRecord::new(format!("n{i}"), format!("N{i}"), (i > 0).then(|| NodeId::from("n0")));
                r.saved_position = Some(Vec3::new(x, y, z));
                r
            })
            .collect();
        let mut c = ViewController::new(SceneState::new(ViewConfig::default().with_seed(3)));
        c.load_records(records);
        c.scene_mut().update_projection(CX, CY);
        c
    }

    #[test]
    fn press_on_root_center_selects_and_drags_root() {
        let mut c = demo_controller();
        let root = c.scene().root().unwrap();
        let p = c.scene().nodes()[root].projected;
        assert_eq!((p.x, p.y), (CX, CY));

        c.handle(PointerEvent::Press { x: p.x, y: p.y });
        assert_eq!(c.scene().selected(), Some(root));
        assert_eq!(c.mode(), Mode::Dragging { node: root });
        let dragging: Vec<usize> = (0..c.scene().nodes().len()).filter(|&i| c.scene().nodes()[i].dragging).collect();
        assert_eq!(dragging, [root]);
    }

    #[test]
    fn nearer_node_wins_overlap() {
        // same screen spot, different depth
        let mut c = placed(&[(0.0, 0.0, 100.0), (0.0, 0.0, -100.0)]);
        assert_eq!(hit_test(c.scene(), CX, CY), Some(1));
        c.handle(PointerEvent::Press { x: CX, y: CY });
        assert_eq!(c.scene().selected(), Some(1));
    }

    #[test]
    fn press_outside_clears_selection_and_rotates() {
        let mut c = demo_controller();
        c.scene_mut().select(Some(0));
        c.handle(PointerEvent::Press { x: 5.0, y: 5.0 });
        assert_eq!(c.scene().selected(), None);
        assert_eq!(c.mode(), Mode::Rotating);

        c.handle(PointerEvent::Move { x: 25.0, y: -5.0 });
        assert_abs_diff_eq!(c.scene().camera.ry, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(c.scene().camera.rx, -0.1, epsilon = 1e-6);
        assert_eq!(c.handle(PointerEvent::Release), None);
        assert_eq!(c.mode(), Mode::Idle);
    }

    #[test]
    fn horizontal_drag_moves_along_world_x_only() {
        let mut c = placed(&[(0.0, 0.0, 0.0)]);
        let start = c.scene().nodes()[0].position;
        c.handle(PointerEvent::Press { x: CX, y: CY });
        c.handle(PointerEvent::Move { x: CX + 30.0, y: CY });
        c.handle(PointerEvent::Move { x: CX + 60.0, y: CY });
        let pos = c.scene().nodes()[0].position;
        assert!(pos.x > start.x);
        assert_eq!(pos.z, start.z);
        assert_eq!(pos.y, start.y);
        assert_eq!(c.scene().nodes()[0].drag_anchor, start);

        // 60 px * 2 / (df * zoom), df = 800 / 1400
        assert_abs_diff_eq!(pos.x, 60.0 * 2.0 / (800.0 / 1400.0), epsilon = 1e-3);
    }

    #[test]
    fn zoomed_in_drag_moves_less() {
        let mut c = placed(&[(0.0, 0.0, 0.0)]);
        c.scene_mut().camera.zoom = 2.0;
        c.scene_mut().update_projection(CX, CY);
        c.handle(PointerEvent::Press { x: CX, y: CY });
        c.handle(PointerEvent::Move { x: CX + 60.0, y: CY });
        let df = 800.0 / 1400.0;
        assert_abs_diff_eq!(c.scene().nodes()[0].position.x, 60.0 * 2.0 / (df * 2.0), epsilon = 1e-3);
    }

    #[test]
    fn vertical_drag_keeps_height() {
        let mut c = placed(&[(0.0, 12.0, 0.0)]);
        c.scene_mut().camera.ry = 0.8;
        c.scene_mut().update_projection(CX, CY);
        let p = c.scene().nodes()[0].projected;
        c.handle(PointerEvent::Press { x: p.x, y: p.y });
        c.handle(PointerEvent::Move { x: p.x + 13.0, y: p.y - 70.0 });
        assert_eq!(c.scene().nodes()[0].position.y, 12.0);
    }

    #[test]
    fn drag_follows_yaw() {
        let mut c = placed(&[(0.0, 0.0, 0.0)]);
        c.scene_mut().camera.ry = std::f32::consts::FRAC_PI_2;
        c.scene_mut().update_projection(CX, CY);
        c.handle(PointerEvent::Press { x: CX, y: CY });
        c.handle(PointerEvent::Move { x: CX + 50.0, y: CY });
        let pos = c.scene().nodes()[0].position;
        // after a quarter turn camera +x is world +z
        assert_abs_diff_eq!(pos.x, 0.0, epsilon = 1e-3);
        assert!(pos.z > 0.0);
    }

    #[test]
    fn release_reports_position_and_clears_flag() {
        let mut c = placed(&[(0.0, 0.0, 0.0)]);
        c.handle(PointerEvent::Press { x: CX, y: CY });
        c.handle(PointerEvent::Move { x: CX + 10.0, y: CY });
        let update = c.handle(PointerEvent::Release).unwrap();
        assert_eq!(update.node_id, NodeId::from("n0"));
        assert_eq!(update.x, c.scene().nodes()[0].position.x);
        assert!(!c.scene().nodes()[0].dragging);
        assert_eq!(c.mode(), Mode::Idle);
    }

    #[test]
    fn release_without_drag_is_noop() {
        let mut c = demo_controller();
        assert_eq!(c.handle(PointerEvent::Release), None);
        assert_eq!(c.mode(), Mode::Idle);
    }

    #[test]
    fn idle_move_updates_hover_only() {
        let mut c = placed(&[(0.0, 0.0, 0.0)]);
        let cam = c.scene().camera.clone();
        c.handle(PointerEvent::Move { x: CX, y: CY });
        assert_eq!(c.scene().hovered(), Some(0));
        assert!(c.scene().nodes()[0].hovered);
        c.handle(PointerEvent::Move { x: 0.0, y: 0.0 });
        assert_eq!(c.scene().hovered(), None);
        assert_eq!(c.scene().camera, cam);
        assert_eq!(c.scene().nodes()[0].position, Vec3::ZERO);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = demo_controller();
        for _ in 0..100 {
            c.handle(PointerEvent::Wheel { delta: 120.0 });
        }
        assert_eq!(c.scene().camera.zoom, 3.0);
        for _ in 0..100 {
            c.handle(PointerEvent::Wheel { delta: -120.0 });
        }
        assert_eq!(c.scene().camera.zoom, 0.1);
        c.handle(PointerEvent::Wheel { delta: -5000.0 });
        assert_eq!(c.scene().camera.zoom, 0.1);
    }

    #[test]
    fn empty_scene_never_hits() {
        let mut c = ViewController::new(SceneState::new(ViewConfig::default().with_seed(1)));
        c.scene_mut().update_projection(CX, CY);
        assert_eq!(hit_test(c.scene(), CX, CY), None);
        c.handle(PointerEvent::Press { x: CX, y: CY });
        assert_eq!(c.mode(), Mode::Rotating);
    }

    #[test]
    fn load_drops_drag() {
        let mut c = placed(&[(0.0, 0.0, 0.0)]);
        c.handle(PointerEvent::Press { x: CX, y: CY });
        c.load_demo();
        assert_eq!(c.mode(), Mode::Idle);
        assert_eq!(c.scene().selected(), None);
        assert_eq!(c.handle(PointerEvent::Release), None);
    }
}
