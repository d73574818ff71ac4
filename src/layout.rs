//! Radial-by-level tree layout.
//!
//! The root sits at the world origin. The children of a node at `level` are
//! spread evenly on a circle of radius `base_radius / (level + 1)` in the X-Z
//! plane around their parent, and every level drops by
//! `level_step * level` below its parent, so the drop accumulates with
//! depth.
//!
//! Traversal follows the parent → children adjacency built from the
//! child → parent map, and never enters a node twice, so malformed input
//! (cycles, shared children) terminates. Nodes the walk never reaches keep
//! whatever position they already had.

use std::f32::consts::TAU;

use log::warn;

use crate::config::ViewConfig;
use crate::scene::{SceneNode, Vec3};

/// Ring radius for the children of a node at `level`.
#[inline]
pub fn radius_for_level(base_radius: f32, level: usize) -> f32 {
    base_radius / (level as f32 + 1.0)
}

/// Lay out the subtree under `root` in place.
pub fn layout_radial(nodes: &mut [SceneNode], children: &[Vec<usize>], root: usize, cfg: &ViewConfig) {
    if root >= nodes.len() {
        return;
    }
    let mut visited = vec![false; nodes.len()];
    visited[root] = true;
    nodes[root].position = Vec3::ZERO;
    place_children(nodes, children, root, 0, cfg, &mut visited);
}

fn place_children(
    nodes: &mut [SceneNode],
    children: &[Vec<usize>],
    parent: usize,
    level: usize,
    cfg: &ViewConfig,
    visited: &mut [bool],
) {
    let Some(kids) = children.get(parent) else {
        return;
    };
    if kids.is_empty() {
        return;
    }

    let radius = radius_for_level(cfg.base_radius, level);
    let step = TAU / kids.len() as f32;
    let center = nodes[parent].position;
    let child_level = level + 1;
    let y = center.y - cfg.level_step * child_level as f32;

    for (i, &child) in kids.iter().enumerate() {
        if visited[child] {
            warn!("layout: {} reached twice, skipping", nodes[child].id);
            continue;
        }
        visited[child] = true;
        let (sin, cos) = (step * i as f32).sin_cos();
        nodes[child].position = Vec3::new(center.x + radius * cos, y, center.z + radius * sin);
        place_children(nodes, children, child, child_level, cfg, visited);
    }
}
