//! Depth-ordered drawing of the scene.
//!
//! A frame is planned first ([`plan_frame`], pure) and painted second
//! ([`paint::paint_frame`], egui). The plan is a back-to-front list of boxes
//! with every size, color and label already resolved, so the same footprint
//! math backs both the picture and hit-testing.
//!
//! Pipeline per frame:
//!   1. [`SceneState::update_projection`] caches each node's screen position
//!   2. nodes are stable-sorted far → near (painter's algorithm)
//!   3. `depth_factor = K / (depth + K)` scales the box and sets its opacity
//!   4. visual variant: selected (or descendant of selected) > hovered > default
//!   5. side faces only when the projected box is big enough to read
//!   6. face label (elided) and hover caption

pub mod paint;
pub mod text;

use egui::{Color32, Pos2, Rect, Stroke};

use crate::config::ViewConfig;
use crate::scene::{Rgb, SceneNode, SceneState};

// ── Depth ──

/// `K / (depth + K)`; 1 at the camera plane, falling towards 0 with distance.
#[inline]
pub fn depth_factor(depth: f32, k: f32) -> f32 {
    k / (depth + k).max(f32::EPSILON)
}

/// `255 * depth_factor`, clamped to `[min, 255]`.
#[inline]
pub fn opacity(depth_factor: f32, min: u8) -> u8 {
    (255.0 * depth_factor).clamp(min as f32, 255.0) as u8
}

/// Indices sorted far → near. Stable, so equal depths keep load order.
pub fn back_to_front(nodes: &[SceneNode]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| nodes[b].projected.depth.total_cmp(&nodes[a].projected.depth));
    order
}

/// Indices sorted near → far, the hit-testing order.
pub fn front_to_back(nodes: &[SceneNode]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| nodes[a].projected.depth.total_cmp(&nodes[b].projected.depth));
    order
}

/// Screen-space extent of a node for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub face: Rect,
    /// Projected box depth (px), used for the oblique side faces
    pub side: f32,
    pub depth_factor: f32,
}

impl Footprint {
    pub fn of(node: &SceneNode, zoom: f32, cfg: &ViewConfig) -> Self {
        let df = depth_factor(node.projected.depth, cfg.depth_constant);
        let k = df * zoom;
        let center = Pos2::new(node.projected.x, node.projected.y);
        Self {
            face: Rect::from_center_size(center, egui::vec2(node.size.x * k, node.size.y * k)),
            side: node.size.z * k,
            depth_factor: df,
        }
    }

    /// Side faces are drawn only above the legibility thresholds.
    pub fn shows_sides(&self, cfg: &ViewConfig) -> bool {
        self.side > cfg.min_side_depth
            && self.face.width() > cfg.min_face_extent
            && self.face.height() > cfg.min_face_extent
    }

    /// Offset of the back face for the oblique "3D" look.
    pub fn side_offset(&self) -> egui::Vec2 {
        egui::vec2(self.side * 0.5, -self.side * 0.5)
    }
}

// ── Visual variants ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    /// The selected node or one of its descendants
    Selected,
    Hovered,
    Default,
}

const SELECT_TINT: Rgb = Rgb::new(255, 200, 60);
const HOVER_EDGE: Rgb = Rgb::new(255, 255, 255);
const LABEL_COLOR: Rgb = Rgb::new(20, 22, 30);

/// Resolved colors for one box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxColors {
    pub face: Color32,
    /// Lit top face
    pub top: Color32,
    /// Shaded right face
    pub side: Color32,
    pub edge: Stroke,
}

impl BoxColors {
    pub fn new(base: Rgb, visual: Visual, alpha: u8) -> Self {
        let (face, edge, width) = match visual {
            Visual::Selected => (base.mix(SELECT_TINT, 0.6), SELECT_TINT, 2.0),
            Visual::Hovered => (base.scaled(1.25), HOVER_EDGE, 1.5),
            Visual::Default => (base, base.scaled(0.6), 1.0),
        };
        Self {
            face: rgba(face, alpha),
            top: rgba(face.scaled(1.15), alpha),
            side: rgba(face.scaled(0.7), alpha),
            edge: Stroke::new(width, rgba(edge, alpha)),
        }
    }
}

#[inline]
pub fn rgba(c: Rgb, a: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

// ── Frame plan ──

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeItem {
    pub from: Pos2,
    pub to: Pos2,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceLabel {
    pub text: String,
    pub font_size: f32,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxItem {
    pub index: usize,
    pub footprint: Footprint,
    pub show_sides: bool,
    pub visual: Visual,
    pub colors: BoxColors,
    pub label: Option<FaceLabel>,
}

/// Floating hover caption with its translucent backing.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub backing: Rect,
    pub text: String,
    pub font_size: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FramePlan {
    /// Drawn first, under every box
    pub edges: Vec<EdgeItem>,
    /// Far → near
    pub boxes: Vec<BoxItem>,
    pub caption: Option<Caption>,
}

const CAPTION_FONT: f32 = 13.0;
const CAPTION_PAD: f32 = 4.0;
const CAPTION_GAP: f32 = 6.0;

/// Plan one frame from the current projections. Nothing is mutated.
pub fn plan_frame(scene: &SceneState) -> FramePlan {
    let cfg = &scene.config;
    let zoom = scene.camera.zoom;
    let nodes = scene.nodes();
    let highlighted = scene.selected_subtree();
    let mut plan = FramePlan::default();

    for conn in scene.connections() {
        let (Some(a), Some(b)) = (scene.node_by_id(&conn.parent), scene.node_by_id(&conn.child)) else {
            continue;
        };
        if !a.projected.in_front() || !b.projected.in_front() {
            continue;
        }
        let df = 0.5
            * (depth_factor(a.projected.depth, cfg.depth_constant)
                + depth_factor(b.projected.depth, cfg.depth_constant));
        plan.edges.push(EdgeItem {
            from: Pos2::new(a.projected.x, a.projected.y),
            to: Pos2::new(b.projected.x, b.projected.y),
            color: Color32::from_rgba_unmultiplied(160, 170, 190, opacity(df, cfg.min_opacity)),
        });
    }

    for idx in back_to_front(nodes) {
        let node = &nodes[idx];
        if !node.projected.in_front() {
            continue;
        }
        let footprint = Footprint::of(node, zoom, cfg);
        let visual = if highlighted[idx] {
            Visual::Selected
        } else if node.hovered {
            Visual::Hovered
        } else {
            Visual::Default
        };
        let alpha = opacity(footprint.depth_factor, cfg.min_opacity);
        plan.boxes.push(BoxItem {
            index: idx,
            show_sides: footprint.shows_sides(cfg),
            visual,
            colors: BoxColors::new(node.color, visual, alpha),
            label: face_label(node, &footprint, alpha, cfg),
            footprint,
        });

        if node.hovered && !node.hover_text.is_empty() {
            plan.caption = Some(caption_for(node, &footprint));
        }
    }
    plan
}

fn face_label(node: &SceneNode, fp: &Footprint, alpha: u8, cfg: &ViewConfig) -> Option<FaceLabel> {
    if node.name.is_empty() || fp.face.width() < cfg.min_label_width || fp.face.height() < cfg.min_label_height {
        return None;
    }
    let font_size = (fp.face.height() * 0.4).clamp(8.0, 18.0);
    let text = text::elide(&node.name, fp.face.width() - 4.0, font_size)?;
    Some(FaceLabel {
        text,
        font_size,
        color: rgba(LABEL_COLOR, alpha),
    })
}

fn caption_for(node: &SceneNode, fp: &Footprint) -> Caption {
    let width = text::approx_width(&node.hover_text, CAPTION_FONT);
    let bottom = fp.face.top() - fp.side * 0.5 - CAPTION_GAP;
    let center = Pos2::new(fp.face.center().x, bottom - CAPTION_FONT * 0.5 - CAPTION_PAD);
    Caption {
        backing: Rect::from_center_size(
            center,
            egui::vec2(width + CAPTION_PAD * 2.0, CAPTION_FONT + CAPTION_PAD * 2.0),
        ),
        text: node.hover_text.clone(),
        font_size: CAPTION_FONT,
    }
}
