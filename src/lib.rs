//! Vector projection for a single pinhole camera
//!
//! Converts world-space points and lines into screen coordinates for
//! vector and point displays, clipping against the near/far depth slab and
//! the screen rectangle. Geometry is single precision and projection never
//! allocates. Results that are not visible come back as NaN sentinels.
//!
//! - `projection` - transforms, camera model and clipping
//! - `config` - RON camera files

pub mod config;
pub mod projection;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{CameraConfig, ConfigError, PoseConfig};
pub use projection::{Camera, Line2, Line3, Point2, Point3, ProjMode, Transform};
