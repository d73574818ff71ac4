//! Built-in demo hierarchy and the cosmetic randomness used for seeding.
//!
//! Everything random goes through the caller's RNG so a seeded
//! [`SceneState`](super::SceneState) reproduces the same scene.

use rand::Rng;

use super::{NodeId, NodeRecord, Rgb, SceneNode, Vec3};
use crate::config::ViewConfig;

/// Box palette, muted so the selected/hovered tints stand out
const PALETTE: &[Rgb] = &[
    Rgb::new(90, 140, 220),  // Blue
    Rgb::new(110, 190, 150), // Green
    Rgb::new(220, 160, 90),  // Amber
    Rgb::new(180, 110, 200), // Purple
    Rgb::new(90, 180, 200),  // Cyan
    Rgb::new(210, 110, 120), // Rose
];

const ROOT_COLOR: Rgb = Rgb::new(235, 235, 245);

/// Half-extent of the cube seeded positions are drawn from
const SEED_EXTENT: f32 = 300.0;

const JITTER_XZ: f32 = 15.0;
const JITTER_Y: f32 = 10.0;

/// (category, hover text, leaves)
const DEMO_TREE: &[(&str, &str, &[&str])] = &[
    ("Documents", "Written material", &["Document 1", "Document 2"]),
    ("Projects", "Ongoing work", &["Project 1", "Project 2"]),
    ("Settings", "Preferences and options", &[]),
];

/// Root → categories → leaves, with randomized box sizes and colors.
pub fn demo_records(rng: &mut impl Rng, cfg: &ViewConfig) -> Vec<NodeRecord> {
    let [w, h, d] = cfg.default_box;
    let root_id = NodeId::from("root");
    let mut out = Vec::new();

    let mut root = NodeRecord::new(root_id.clone(), "Root Node", None);
    root.name = "Root".into();
    root.hover_text = "Top of the outline".into();
    root.size = Some(Vec3::new(w * 1.5, h * 1.5, d * 1.5));
    root.color = Some(ROOT_COLOR);
    out.push(root);

    for (ci, &(category, hover, leaves)) in DEMO_TREE.iter().enumerate() {
        let cat_id = NodeId(format!("cat-{ci}"));
        let color = PALETTE[ci % PALETTE.len()];
        let mut cat = NodeRecord::new(cat_id.clone(), category, Some(root_id.clone()));
        cat.name = category.into();
        cat.hover_text = hover.into();
        cat.size = Some(random_size(rng, w * 1.2, h * 1.2, d * 1.2));
        cat.color = Some(color);
        out.push(cat);

        for (li, &leaf) in leaves.iter().enumerate() {
            let mut node = NodeRecord::new(format!("cat-{ci}-{li}"), leaf, Some(cat_id.clone()));
            node.name = leaf.into();
            node.hover_text = format!("{leaf} in {category}");
            node.size = Some(random_size(rng, w, h, d));
            node.color = Some(color.mix(random_color(rng), 0.35));
            out.push(node);
        }
    }
    out
}

/// Uniform point in the seeding cube.
pub fn random_position(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-SEED_EXTENT..=SEED_EXTENT),
        rng.gen_range(-SEED_EXTENT * 0.5..=SEED_EXTENT * 0.5),
        rng.gen_range(-SEED_EXTENT..=SEED_EXTENT),
    )
}

pub fn random_color(rng: &mut impl Rng) -> Rgb {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}

/// Base size scaled by a factor in `[0.8, 1.2]`.
fn random_size(rng: &mut impl Rng, w: f32, h: f32, d: f32) -> Vec3 {
    let k = rng.gen_range(0.8..=1.2);
    Vec3::new(w * k, h * k, d * k)
}

/// Nudge every non-root node a little so the demo does not look machined.
pub fn jitter_positions(nodes: &mut [SceneNode], root: Option<usize>, rng: &mut impl Rng) {
    for (i, node) in nodes.iter_mut().enumerate() {
        if Some(i) == root {
            continue;
        }
        node.position = node.position
            + Vec3::new(
                rng.gen_range(-JITTER_XZ..=JITTER_XZ),
                rng.gen_range(-JITTER_Y..=JITTER_Y),
                rng.gen_range(-JITTER_XZ..=JITTER_XZ),
            );
    }
}
