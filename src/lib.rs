//! Interaction core for a 3D glow-stroke sketching surface: pointer events
//! in, gradient-colored polyline strokes out. Drawing happens on a plane
//! resolved per stroke, either snapped onto existing geometry or floating at
//! a fixed distance from the camera; rendering, windowing and orbit controls
//! stay with the host.

pub mod camera;
pub mod config;
mod engine;
pub mod geom;
pub mod input;

pub use camera::{CameraProjection, PerspectiveCamera};
pub use config::{config, ConfigError, SketchConfig};
pub use engine::*;
pub use geom::{Plane, Ray};
pub use input::{PointerButton, SurfaceRect};
