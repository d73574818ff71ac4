//! 3D tree view engine for outliner hierarchies.
//!
//! A hierarchy snapshot is laid out radially in world space, projected
//! through a rotating/zooming camera, painted back-to-front with depth cues,
//! and driven by pointer input (rotate, zoom, hover, select, drag).

pub mod camera;
pub mod command;
pub mod config;
pub mod error;
pub mod interact;
pub mod layout;
pub mod render;
pub mod scene;

pub use camera::{Camera, Projected};
pub use config::ViewConfig;
pub use error::{ConfigError, LoadError, SaveError};
pub use interact::{PointerEvent, ViewController};
pub use scene::{NodeId, NodeRecord, PositionUpdate, SceneNode, SceneState, Vec3};
