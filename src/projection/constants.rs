//! Projection constants
//!
//! Display resolution and camera intrinsics defaults.

/// Default display width in pixels
pub const WIDTH: u32 = 320;

/// Default display height in pixels
pub const HEIGHT: u32 = 240;

/// Larger display used by the test scenarios
#[cfg(test)]
pub(crate) const WIDTH_HI: u32 = 640;

#[cfg(test)]
pub(crate) const HEIGHT_HI: u32 = 480;

/// Closest depth a camera will ever clip at, regardless of its near distance
pub const MIN_NEAR_DIST: f32 = 0.1;

/// Default focal distance in pixels
pub const DEFAULT_FOCAL_DIST_PX: f32 = 75.0;

pub const DEFAULT_NEAR_DIST: f32 = MIN_NEAR_DIST;
pub const DEFAULT_FAR_DIST: f32 = 1000.0;

/// Default world-space width visible in orthographic mode
pub const DEFAULT_ORTHO_VIEW_WIDTH: f32 = 100.0;

/// Default camera pose roll (degrees): camera +Z looks along world +Y
pub const DEFAULT_ROLL_DEG: f32 = -90.0;
