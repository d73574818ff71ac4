//! End-to-end: outline file in, pointer gestures, positions file out.

use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use treeline_3d::interact::Mode;
use treeline_3d::scene::source::OutlineFile;
use treeline_3d::scene::{write_positions, LoadOutcome};
use treeline_3d::{NodeId, PointerEvent, PositionUpdate, SceneState, ViewConfig, ViewController};

const CX: f32 = 500.0;
const CY: f32 = 350.0;

const OUTLINE: &str = r#"{
    "id": "root", "title": "Library",
    "children": [
        { "id": "books", "title": "Books",
          "fields": { "name": "shelf", "description": "Paper things" },
          "children": [ { "id": "novel", "title": "Novel" } ] },
        { "id": "pinned", "title": "Pinned",
          "fields": { "position_x": 150, "position_y": -80, "position_z": 20 } }
    ]
}"#;

fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("treeline-3d-{}-{tag}.json", std::process::id()))
}

fn controller() -> ViewController {
    ViewController::new(SceneState::new(ViewConfig::default().with_seed(42)))
}

#[test]
fn outline_file_loads_and_drag_reports_new_position() {
    let outline = temp_path("outline");
    std::fs::write(&outline, OUTLINE).unwrap();

    let mut c = controller();
    let outcome = c.load_source(&OutlineFile::new(&outline));
    std::fs::remove_file(&outline).ok();

    let LoadOutcome::Loaded(summary) = outcome else {
        panic!("outline should load, got {outcome:?}");
    };
    assert_eq!(summary.nodes, 4);
    assert_eq!(summary.connections, 3);

    let scene = c.scene();
    let pinned = scene.node_by_id(&NodeId::from("pinned")).unwrap();
    assert_eq!((pinned.position.x, pinned.position.y, pinned.position.z), (150.0, -80.0, 20.0));
    let books = scene.node_by_id(&NodeId::from("books")).unwrap();
    assert_eq!(books.name, "shelf");
    assert_eq!(books.hover_text, "Paper things");

    // Root sits at the origin, so it projects onto the viewport centre.
    c.scene_mut().update_projection(CX, CY);
    let root = c.scene().root().unwrap();
    let before = c.scene().nodes()[root].position;

    assert_eq!(c.handle(PointerEvent::Press { x: CX, y: CY }), None);
    assert_eq!(c.mode(), Mode::Dragging { node: root });
    assert_eq!(c.scene().selected(), Some(root));

    c.handle(PointerEvent::Move { x: CX + 30.0, y: CY });
    c.handle(PointerEvent::Move { x: CX + 60.0, y: CY });
    let update = c.handle(PointerEvent::Release).expect("drag release reports a position");

    assert_eq!(update.node_id, NodeId::from("root"));
    assert!(update.x > before.x);
    assert_eq!(update.y, before.y);
    assert_abs_diff_eq!(update.z, before.z, epsilon = 1e-4);
    assert_eq!(c.mode(), Mode::Idle);
    assert!(!c.scene().nodes()[root].dragging);
}

#[test]
fn rotate_then_zoom_from_empty_space() {
    let mut c = controller();
    c.load_demo();
    c.scene_mut().update_projection(CX, CY);

    // Well off the canvas: nothing there.
    let (x, y) = (CX + 5000.0, CY + 5000.0);
    c.handle(PointerEvent::Press { x, y });
    assert_eq!(c.mode(), Mode::Rotating);
    assert_eq!(c.scene().selected(), None);
    c.handle(PointerEvent::Move { x: x + 10.0, y: y + 20.0 });
    assert_eq!(c.handle(PointerEvent::Release), None);

    let cam = &c.scene().camera;
    assert_abs_diff_eq!(cam.ry, 0.1, epsilon = 1e-5);
    assert_abs_diff_eq!(cam.rx, 0.2, epsilon = 1e-5);

    for _ in 0..50 {
        c.handle(PointerEvent::Wheel { delta: 500.0 });
    }
    assert_eq!(c.scene().camera.zoom, 3.0);
    for _ in 0..50 {
        c.handle(PointerEvent::Wheel { delta: -500.0 });
    }
    assert_abs_diff_eq!(c.scene().camera.zoom, 0.1, epsilon = 1e-6);
}

#[test]
fn unreadable_outline_falls_back_to_demo() {
    let mut c = controller();
    let outcome = c.load_source(&OutlineFile::new(temp_path("missing")));
    match outcome {
        LoadOutcome::FellBackToDemo(summary) => assert_eq!(summary.nodes, 8),
        other => panic!("expected demo fallback, got {other:?}"),
    }
    assert!(c.scene().node_by_id(&NodeId::from("root")).is_some());
}

#[test]
fn saved_positions_cover_every_node() {
    let mut c = controller();
    c.load_demo();
    let path = temp_path("positions");
    let updates = c.scene().position_updates();
    write_positions(&path, &updates).unwrap();

    let back: Vec<PositionUpdate> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(back.len(), c.scene().nodes().len());
    for (saved, node) in back.iter().zip(c.scene().nodes()) {
        assert_eq!(saved.node_id, node.id);
        assert_eq!((saved.x, saved.y, saved.z), (node.position.x, node.position.y, node.position.z));
    }
}
