//! Host hierarchy access.
//!
//! The host exposes its outline through [`HierarchyNode`]: an id, a title,
//! named string fields and an ordered child list (empty for leaves). Any of
//! the values may be missing; [`records_from_hierarchy`] fills the gaps so
//! a sparse outline still produces a complete scene.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use super::{fresh_node_id, NodeId, NodeRecord, Vec3};
use crate::error::LoadError;

/// Read-only view of one outline entry.
pub trait HierarchyNode {
    fn id(&self) -> Option<String>;
    fn title(&self) -> Option<String>;
    /// A named data field, stringified.
    fn field(&self, name: &str) -> Option<String>;
    fn children(&self) -> Vec<&dyn HierarchyNode>;
}

impl<T: HierarchyNode + ?Sized> HierarchyNode for &T {
    fn id(&self) -> Option<String> {
        (**self).id()
    }

    fn title(&self) -> Option<String> {
        (**self).title()
    }

    fn field(&self, name: &str) -> Option<String> {
        (**self).field(name)
    }

    fn children(&self) -> Vec<&dyn HierarchyNode> {
        (**self).children()
    }
}

/// Something that can hand out the root of a hierarchy. May fail.
pub trait HierarchySource {
    fn root(&self) -> Result<Box<dyn HierarchyNode + '_>, LoadError>;
}

// ── JSON outline ──

/// One entry of a JSON outline document.
///
/// ```json
/// { "id": "a", "title": "Alpha",
///   "fields": { "name": "A", "position_x": 10 },
///   "children": [] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl HierarchyNode for OutlineNode {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn HierarchyNode> {
        self.children.iter().map(|c| c as &dyn HierarchyNode).collect()
    }
}

impl HierarchySource for OutlineNode {
    fn root(&self) -> Result<Box<dyn HierarchyNode + '_>, LoadError> {
        Ok(Box::new(self))
    }
}

/// Outline stored as JSON on disk, read on every [`HierarchySource::root`].
#[derive(Debug, Clone)]
pub struct OutlineFile {
    path: PathBuf,
}

impl OutlineFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<OutlineNode, LoadError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let root: Option<OutlineNode> = serde_json::from_str(&text).map_err(|source| LoadError::Parse {
            path: self.path.clone(),
            source,
        })?;
        root.ok_or(LoadError::EmptyDocument)
    }
}

impl HierarchySource for OutlineFile {
    fn root(&self) -> Result<Box<dyn HierarchyNode + '_>, LoadError> {
        Ok(Box::new(self.read()?))
    }
}

// ── Conversion ──

const UNTITLED: &str = "Untitled";

/// Flatten a hierarchy into records, pre-order, parents before children.
///
/// Missing or duplicate ids become `node-<n>`, a missing title becomes
/// `Untitled`, hover text comes from `description` or else `text`, and a
/// saved position is kept only when all three `position_*` fields parse.
pub fn records_from_hierarchy(root: &dyn HierarchyNode) -> Vec<NodeRecord> {
    let mut out = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_nodes: HashSet<*const ()> = HashSet::new();
    let mut stack: Vec<(&dyn HierarchyNode, Option<NodeId>)> = vec![(root, None)];

    while let Some((node, parent)) = stack.pop() {
        let addr = std::ptr::from_ref(node).cast::<()>();
        if !seen_nodes.insert(addr) {
            warn!("outline entry reached twice, skipping");
            continue;
        }

        let n = out.len();
        let fresh = |seen: &HashSet<String>| fresh_node_id(n, |id| seen.contains(id.as_str()));
        let id = match non_empty(node.id()) {
            Some(id) if !seen_ids.contains(&id) => NodeId(id),
            Some(dup) => {
                let id = fresh(&seen_ids);
                warn!("duplicate outline id {dup}, using {id}");
                id
            }
            None => fresh(&seen_ids),
        };
        seen_ids.insert(id.0.clone());

        let mut rec = NodeRecord::new(
            id.clone(),
            non_empty(node.title()).unwrap_or_else(|| UNTITLED.to_owned()),
            parent,
        );
        rec.name = non_empty(node.field("name")).unwrap_or_default();
        rec.hover_text = non_empty(node.field("description"))
            .or_else(|| non_empty(node.field("text")))
            .unwrap_or_default();
        rec.saved_position = saved_position(node);
        out.push(rec);

        // reversed so the first child is popped first
        for child in node.children().into_iter().rev() {
            stack.push((child, Some(id.clone())));
        }
    }
    out
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

fn saved_position(node: &dyn HierarchyNode) -> Option<Vec3> {
    let axis = |name: &str| {
        node.field(name)
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite())
    };
    Some(Vec3::new(axis("position_x")?, axis("position_y")?, axis("position_z")?))
}
