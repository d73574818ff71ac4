//! Scene model: positioned 3D nodes, hierarchy edges and the camera.
//!
//! A [`SceneState`] is rebuilt wholesale on every load. Node positions live in
//! world space; `projected` is a per-frame cache filled by
//! [`SceneState::update_projection`] and read by both the renderer and the
//! hit-tester so that what is drawn and what is clickable agree.

pub mod demo;
pub mod source;

use std::collections::HashMap;
use std::fmt;
use std::ops::Add;
use std::path::Path;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Projected};
use crate::config::ViewConfig;
use crate::error::SaveError;
use crate::layout::layout_radial;
use source::HierarchySource;

// ── Geometry ──

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

/// Opaque RGB. Alpha is derived per frame from depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel, saturating at 255.
    pub fn scaled(self, k: f32) -> Self {
        let ch = |c: u8| (c as f32 * k).round().clamp(0.0, 255.0) as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }

    /// Linear blend towards `other` by `t` in `[0, 1]`.
    pub fn mix(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }
}

// ── Identity ──

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Nodes & edges ──

/// One box in the scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    /// Primary label
    pub title: String,
    /// Secondary label drawn on the face (empty = none)
    pub name: String,
    /// Caption shown while hovered (empty = none)
    pub hover_text: String,
    pub parent: Option<NodeId>,
    pub position: Vec3,
    /// (width, height, depth), all positive
    pub size: Vec3,
    pub color: Rgb,
    /// Current-frame projection of `position`
    pub projected: Projected,
    pub hovered: bool,
    pub dragging: bool,
    /// Position at drag start. Only meaningful between press and release.
    pub drag_anchor: Vec3,
}

/// A hierarchy edge, parent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub parent: NodeId,
    pub child: NodeId,
}

/// Flat input row for [`SceneState::load_records`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    pub title: String,
    pub name: String,
    pub hover_text: String,
    pub parent: Option<NodeId>,
    /// Persisted position; overrides layout when present
    pub saved_position: Option<Vec3>,
    /// Explicit box size; config default otherwise
    pub size: Option<Vec3>,
    /// Explicit color; random palette color otherwise
    pub color: Option<Rgb>,
}

impl NodeRecord {
    pub fn new(id: impl Into<NodeId>, title: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            name: String::new(),
            hover_text: String::new(),
            parent,
            saved_position: None,
            size: None,
            color: None,
        }
    }
}

/// A node position for the host to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub node_id: NodeId,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PositionUpdate {
    fn of(node: &SceneNode) -> Self {
        Self {
            node_id: node.id.clone(),
            x: node.position.x,
            y: node.position.y,
            z: node.position.z,
        }
    }
}

/// Write position updates as a pretty-printed JSON array.
pub fn write_positions(path: &Path, updates: &[PositionUpdate]) -> Result<(), SaveError> {
    let json = serde_json::to_string_pretty(updates)?;
    std::fs::write(path, json).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// First of `node-{n}`, `node-{n+1}`, ... that `taken` rejects.
pub(crate) fn fresh_node_id(n: usize, taken: impl Fn(&NodeId) -> bool) -> NodeId {
    (n..)
        .map(|k| NodeId(format!("node-{k}")))
        .find(|id| !taken(id))
        .unwrap_or_else(|| NodeId(format!("node-{n}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub nodes: usize,
    pub connections: usize,
}

/// Result of [`SceneState::load_source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LoadSummary),
    /// The source failed; the demo scene is shown instead.
    FellBackToDemo(LoadSummary),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SceneState
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Everything the view owns: nodes, edges, camera, selection and hover.
#[derive(Debug)]
pub struct SceneState {
    pub config: ViewConfig,
    pub camera: Camera,
    nodes: Vec<SceneNode>,
    index: HashMap<NodeId, usize>,
    connections: Vec<Connection>,
    /// Parent index → child indices, in connection order
    children: Vec<Vec<usize>>,
    root: Option<usize>,
    selected: Option<usize>,
    hovered: Option<usize>,
    rng: StdRng,
}

impl SceneState {
    pub fn new(config: ViewConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            camera: Camera::new(&config),
            config,
            nodes: Vec::new(),
            index: HashMap::new(),
            connections: Vec::new(),
            children: Vec::new(),
            root: None,
            selected: None,
            hovered: None,
            rng,
        }
    }

    // ── Loading ──

    /// Replace the scene with `records`, laid out radially from the root.
    pub fn load_records(&mut self, records: Vec<NodeRecord>) -> LoadSummary {
        self.rebuild(records, false)
    }

    /// Replace the scene with the demo hierarchy.
    pub fn load_demo(&mut self) -> LoadSummary {
        let records = demo::demo_records(&mut self.rng, &self.config);
        let summary = self.rebuild(records, true);
        info!("demo scene loaded: {} nodes", summary.nodes);
        summary
    }

    /// Import from a host hierarchy, falling back to the demo on failure.
    pub fn load_source(&mut self, source: &dyn HierarchySource) -> LoadOutcome {
        match source.root() {
            Ok(root) => {
                let records = source::records_from_hierarchy(root.as_ref());
                LoadOutcome::Loaded(self.load_records(records))
            }
            Err(e) => {
                warn!("hierarchy load failed, showing demo scene: {e}");
                LoadOutcome::FellBackToDemo(self.load_demo())
            }
        }
    }

    fn rebuild(&mut self, records: Vec<NodeRecord>, jitter: bool) -> LoadSummary {
        self.nodes.clear();
        self.index.clear();
        self.connections.clear();
        self.children.clear();
        self.root = None;
        self.selected = None;
        self.hovered = None;

        let mut saved = Vec::with_capacity(records.len());
        for (i, rec) in records.into_iter().enumerate() {
            let id = if self.index.contains_key(&rec.id) {
                let fresh = fresh_node_id(i, |id| self.index.contains_key(id));
                warn!("duplicate node id {}, renamed to {fresh}", rec.id);
                fresh
            } else {
                rec.id
            };
            let position = demo::random_position(&mut self.rng);
            let color = rec.color.unwrap_or_else(|| demo::random_color(&mut self.rng));
            let [w, h, d] = self.config.default_box;
            let size = rec.size.unwrap_or(Vec3::new(w, h, d));
            self.index.insert(id.clone(), self.nodes.len());
            saved.push(rec.saved_position);
            self.nodes.push(SceneNode {
                id,
                title: rec.title,
                name: rec.name,
                hover_text: rec.hover_text,
                parent: rec.parent,
                position,
                size: Vec3::new(size.x.max(f32::EPSILON), size.y.max(f32::EPSILON), size.z.max(f32::EPSILON)),
                color,
                projected: Projected { x: 0.0, y: 0.0, depth: 0.0 },
                hovered: false,
                dragging: false,
                drag_anchor: position,
            });
        }

        self.children = vec![Vec::new(); self.nodes.len()];
        for child in 0..self.nodes.len() {
            let Some(parent_id) = self.nodes[child].parent.clone() else {
                if self.root.is_none() {
                    self.root = Some(child);
                } else {
                    warn!("extra root {} is not laid out", self.nodes[child].id);
                }
                continue;
            };
            if parent_id == self.nodes[child].id {
                warn!("node {parent_id} lists itself as parent");
                continue;
            }
            match self.index.get(&parent_id) {
                Some(&parent) => {
                    self.children[parent].push(child);
                    self.connections.push(Connection {
                        parent: parent_id,
                        child: self.nodes[child].id.clone(),
                    });
                }
                None => warn!("node {} has unresolved parent {parent_id}", self.nodes[child].id),
            }
        }

        match self.root {
            Some(root) => layout_radial(&mut self.nodes, &self.children, root, &self.config),
            None if !self.nodes.is_empty() => warn!("hierarchy has no root; keeping seeded positions"),
            None => {}
        }
        if jitter {
            demo::jitter_positions(&mut self.nodes, self.root, &mut self.rng);
        }
        for (node, pos) in self.nodes.iter_mut().zip(saved) {
            if let Some(pos) = pos {
                node.position = pos;
            }
            node.drag_anchor = node.position;
        }

        let summary = LoadSummary {
            nodes: self.nodes.len(),
            connections: self.connections.len(),
        };
        info!("scene rebuilt: {} nodes, {} connections", summary.nodes, summary.connections);
        summary
    }

    // ── Accessors ──

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> Option<&SceneNode> {
        self.nodes.get(idx)
    }

    pub(crate) fn node_mut(&mut self, idx: usize) -> Option<&mut SceneNode> {
        self.nodes.get_mut(idx)
    }

    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node_by_id(&self, id: &NodeId) -> Option<&SceneNode> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn children_of(&self, idx: usize) -> &[usize] {
        self.children.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Selection & hover ──

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&SceneNode> {
        self.selected.and_then(|i| self.nodes.get(i))
    }

    pub fn select(&mut self, idx: Option<usize>) {
        self.selected = idx.filter(|&i| i < self.nodes.len());
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Move the hover flag to `idx` (or clear it).
    pub fn set_hovered(&mut self, idx: Option<usize>) {
        let idx = idx.filter(|&i| i < self.nodes.len());
        if self.hovered == idx {
            return;
        }
        if let Some(old) = self.hovered.and_then(|i| self.nodes.get_mut(i)) {
            old.hovered = false;
        }
        if let Some(new) = idx.and_then(|i| self.nodes.get_mut(i)) {
            new.hovered = true;
        }
        self.hovered = idx;
    }

    /// Mask of the selected node and all of its descendants.
    pub fn selected_subtree(&self) -> Vec<bool> {
        let mut mask = vec![false; self.nodes.len()];
        if let Some(sel) = self.selected {
            self.mark_subtree(sel, &mut mask);
        }
        mask
    }

    fn mark_subtree(&self, idx: usize, mask: &mut [bool]) {
        if mask[idx] {
            return;
        }
        mask[idx] = true;
        for &child in &self.children[idx] {
            self.mark_subtree(child, mask);
        }
    }

    /// Drop selection, hover and drag flags.
    pub fn clear_transient(&mut self) {
        self.selected = None;
        self.hovered = None;
        for node in &mut self.nodes {
            node.hovered = false;
            node.dragging = false;
        }
    }

    // ── Camera & projection ──

    pub fn reset_camera(&mut self) {
        self.camera.reset(&self.config);
        info!("camera reset");
    }

    /// Re-centre the camera on the viewport and project every node.
    pub fn update_projection(&mut self, cx: f32, cy: f32) {
        self.camera.set_viewport_center(cx, cy);
        for node in &mut self.nodes {
            node.projected = self.camera.project(node.position);
        }
    }

    // ── Persistence ──

    /// Every node position, in load order.
    pub fn position_updates(&self) -> Vec<PositionUpdate> {
        self.nodes.iter().map(PositionUpdate::of).collect()
    }

    pub(crate) fn position_update(&self, idx: usize) -> Option<PositionUpdate> {
        self.nodes.get(idx).map(PositionUpdate::of)
    }
}
