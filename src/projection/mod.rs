//! Single-camera world-to-screen projection
//!
//! Features:
//! - Affine transforms with analytic inverse and composition
//! - Perspective and orthographic image mapping
//! - Outcode line clipping against the near/far depth slab and the screen
//! - NaN sentinel results for geometry that is not visible
//!
//! # Module Organization
//!
//! - `math` - Point2, Point3, Line2, Line3 value types
//! - `transform` - Transform (3x3 block + translation)
//! - `camera` - Camera and the projection pipeline
//! - `clip` - Depth slab and viewport clipping
//! - `constants` - Display sizes and camera defaults

pub mod camera;
pub mod clip;
pub mod constants;
pub mod math;
pub mod transform;


// =============================================================================
// Convenience re-exports for commonly used items
// =============================================================================

pub use camera::{Camera, ProjMode};
pub use clip::{clip_line, clip_point, ClipRegion, DepthSlab, Viewport};
pub use constants::{HEIGHT, MIN_NEAR_DIST, WIDTH};
pub use math::{Line2, Line3, Point2, Point3};
pub use transform::Transform;
