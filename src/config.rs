//! Camera configuration loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable camera files.
//! A file describes the camera pose either as euler angles, scale and
//! position, or as an explicit matrix and translation, plus the intrinsics.
//! Every field is optional and falls back to the default camera.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::projection::constants::*;
use crate::projection::{Camera, Point3, ProjMode, Transform};

/// Validation limits to reject unusable camera files
pub mod limits {
    /// Maximum display dimension in pixels
    pub const MAX_SCREEN_SIZE: u32 = 16_384;
    /// Maximum magnitude of any coordinate, distance or matrix entry
    pub const MAX_COORD: f32 = 1_000_000.0;
    /// Pose matrices with a smaller determinant magnitude are treated as singular
    pub const MIN_POSE_DET: f32 = 1e-12;
}

/// Error type for camera configuration I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Camera-to-world placement as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PoseConfig {
    /// Angles in degrees, applied Z * Y * X
    Euler {
        angles: Point3,
        #[serde(default = "unit_scale")]
        scale: Point3,
        #[serde(default)]
        position: Point3,
    },
    Matrix(Transform),
}

fn unit_scale() -> Point3 {
    Point3::ONE
}

impl Default for PoseConfig {
    fn default() -> Self {
        PoseConfig::Euler {
            angles: Point3::new(DEFAULT_ROLL_DEG, 0.0, 0.0),
            scale: Point3::ONE,
            position: Point3::ZERO,
        }
    }
}

impl PoseConfig {
    pub fn to_transform(&self) -> Transform {
        match self {
            PoseConfig::Euler { angles, scale, position } => {
                Transform::from_euler(*angles, *scale, *position)
            }
            PoseConfig::Matrix(t) => *t,
        }
    }
}

/// Serializable camera description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub proj_mode: ProjMode,
    pub pose: PoseConfig,
    pub focal_dist_px: f32,
    pub near_dist: f32,
    pub far_dist: f32,
    pub ortho_view_width: f32,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::with_display(WIDTH, HEIGHT)
    }
}

impl CameraConfig {
    /// Default camera description for a `width x height` display
    pub fn with_display(width: u32, height: u32) -> Self {
        Self {
            proj_mode: ProjMode::Perspective,
            pose: PoseConfig::default(),
            focal_dist_px: DEFAULT_FOCAL_DIST_PX,
            near_dist: DEFAULT_NEAR_DIST,
            far_dist: DEFAULT_FAR_DIST,
            ortho_view_width: DEFAULT_ORTHO_VIEW_WIDTH,
            screen_width: width,
            screen_height: height,
        }
    }

    pub fn to_camera(&self) -> Camera {
        Camera {
            proj_mode: self.proj_mode,
            transform: self.pose.to_transform(),
            focal_dist_px: self.focal_dist_px,
            near_dist: self.near_dist,
            far_dist: self.far_dist,
            ortho_view_width: self.ortho_view_width,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
        }
    }
}

impl From<&Camera> for CameraConfig {
    fn from(camera: &Camera) -> Self {
        Self {
            proj_mode: camera.proj_mode,
            pose: PoseConfig::Matrix(camera.transform),
            focal_dist_px: camera.focal_dist_px,
            near_dist: camera.near_dist,
            far_dist: camera.far_dist,
            ortho_view_width: camera.ortho_view_width,
            screen_width: camera.screen_width,
            screen_height: camera.screen_height,
        }
    }
}

/// Check if a float is usable (not NaN or Inf, within limits)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn validate_point(p: Point3, context: &str) -> Result<(), String> {
    for (axis, v) in [("x", p.x), ("y", p.y), ("z", p.z)] {
        if !is_valid_float(v) {
            return Err(format!("{}: invalid {} = {}", context, axis, v));
        }
    }
    Ok(())
}

fn validate_pose(pose: &PoseConfig) -> Result<(), String> {
    let transform = pose.to_transform();
    if let PoseConfig::Euler { angles, scale, position } = pose {
        validate_point(*angles, "pose angles")?;
        validate_point(*scale, "pose scale")?;
        validate_point(*position, "pose position")?;
    }
    for (i, row) in transform.m.iter().enumerate() {
        validate_point(Point3::new(row[0], row[1], row[2]), &format!("pose row {}", i))?;
    }
    validate_point(transform.translation, "pose translation")?;

    let det = transform.determinant();
    if det.abs() < limits::MIN_POSE_DET {
        return Err(format!("pose matrix is singular (determinant {})", det));
    }
    Ok(())
}

/// Validate a camera description
pub fn validate_config(config: &CameraConfig) -> Result<(), ConfigError> {
    let check = || -> Result<(), String> {
        if config.screen_width == 0 || config.screen_height == 0 {
            return Err(format!(
                "screen size must be non-zero ({}x{})",
                config.screen_width, config.screen_height
            ));
        }
        if config.screen_width > limits::MAX_SCREEN_SIZE
            || config.screen_height > limits::MAX_SCREEN_SIZE
        {
            return Err(format!(
                "screen size too large ({}x{} > {})",
                config.screen_width,
                config.screen_height,
                limits::MAX_SCREEN_SIZE
            ));
        }
        for (name, v) in [
            ("focal_dist_px", config.focal_dist_px),
            ("near_dist", config.near_dist),
            ("far_dist", config.far_dist),
            ("ortho_view_width", config.ortho_view_width),
        ] {
            if !is_valid_float(v) {
                return Err(format!("invalid {} = {}", name, v));
            }
        }
        if config.focal_dist_px <= 0.0 {
            return Err(format!("focal_dist_px must be positive ({})", config.focal_dist_px));
        }
        if config.ortho_view_width <= 0.0 {
            return Err(format!(
                "ortho_view_width must be positive ({})",
                config.ortho_view_width
            ));
        }
        validate_pose(&config.pose)
    };
    check().map_err(ConfigError::Validation)
}

/// Parse and validate a camera description from a RON string
pub fn load_camera_config_from_str(s: &str) -> Result<CameraConfig, ConfigError> {
    let config: CameraConfig = match ron::from_str(s) {
        Ok(c) => c,
        Err(e) => {
            warn!(line = e.position.line, col = e.position.col, error = %e.code, "camera config parse error");
            return Err(e.into());
        }
    };
    validate_config(&config)?;
    Ok(config)
}

/// Load a camera description from a RON file
pub fn load_camera_config<P: AsRef<Path>>(path: P) -> Result<CameraConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config = load_camera_config_from_str(&contents)?;
    debug!(path = %path.display(), mode = ?config.proj_mode, "loaded camera config");
    Ok(config)
}

/// Load a camera from a RON file
pub fn load_camera<P: AsRef<Path>>(path: P) -> Result<Camera, ConfigError> {
    Ok(load_camera_config(path)?.to_camera())
}

/// Serialize a camera description to pretty RON
pub fn camera_config_to_string(config: &CameraConfig) -> Result<String, ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(config, pretty)?)
}

/// Save a camera description to a RON file
pub fn save_camera_config<P: AsRef<Path>>(config: &CameraConfig, path: P) -> Result<(), ConfigError> {
    validate_config(config)?;
    let path = path.as_ref();
    fs::write(path, camera_config_to_string(config)?)?;
    debug!(path = %path.display(), "saved camera config");
    Ok(())
}
