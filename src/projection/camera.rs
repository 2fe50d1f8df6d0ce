//! Camera for world-to-screen projection
//!
//! Holds a camera-to-world pose plus intrinsics, and runs the projection
//! pipeline: world -> camera space -> depth-slab clip -> image coordinates ->
//! viewport clip -> optional rounding.
//!
//! Fields are public and may be changed freely between calls. Projection
//! borrows the camera immutably, so it cannot change during a call.

use serde::{Deserialize, Serialize};

use super::clip::{clip_line, DepthSlab, Viewport};
use super::constants::*;
use super::math::{Line2, Line3, Point2, Point3};
use super::transform::Transform;

/// Projection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Pinhole camera state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub proj_mode: ProjMode,
    /// Camera-to-world pose
    pub transform: Transform,
    pub focal_dist_px: f32,
    pub near_dist: f32,
    pub far_dist: f32,
    /// World-space width spanned by the screen in orthographic mode
    pub ortho_view_width: f32,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Camera {
    /// Default camera at the origin looking along world +Y, default display size
    pub fn new() -> Self {
        Self::with_display(WIDTH, HEIGHT)
    }

    /// Default camera for a `width x height` display
    pub fn with_display(width: u32, height: u32) -> Self {
        Self {
            proj_mode: ProjMode::Perspective,
            transform: Self::default_pose(),
            focal_dist_px: DEFAULT_FOCAL_DIST_PX,
            near_dist: DEFAULT_NEAR_DIST,
            far_dist: DEFAULT_FAR_DIST,
            ortho_view_width: DEFAULT_ORTHO_VIEW_WIDTH,
            screen_width: width,
            screen_height: height,
        }
    }

    /// Pose with camera +Z along world +Y
    pub fn default_pose() -> Transform {
        Transform::from_euler(
            Point3::new(DEFAULT_ROLL_DEG, 0.0, 0.0),
            Point3::ONE,
            Point3::ZERO,
        )
    }

    /// Effective depth bounds: near is at least `MIN_NEAR_DIST`, far at least near
    pub fn depth_range(&self) -> DepthSlab {
        let near = self.near_dist.max(MIN_NEAR_DIST);
        let far = self.far_dist.max(near);
        DepthSlab::new(near, far)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_screen(self.screen_width, self.screen_height)
    }

    /// Transform a world-space point into camera space
    pub fn world_to_camera(&self, point: Point3) -> Point3 {
        self.transform.inverse() * point
    }

    /// Map a camera-space point to unrounded screen coordinates.
    ///
    /// Orthographic mode scales both axes by `screen_width / ortho_view_width`.
    /// The screen center uses the integer half of the display size.
    pub fn image_coords(&self, cam_point: Point3) -> Point2 {
        let half_w = (self.screen_width / 2) as f32;
        let half_h = (self.screen_height / 2) as f32;

        match self.proj_mode {
            ProjMode::Perspective => Point2 {
                x: self.focal_dist_px * cam_point.x / cam_point.z + half_w,
                y: self.focal_dist_px * cam_point.y / cam_point.z + half_h,
            },
            ProjMode::Orthographic => {
                let w = self.screen_width as f32;
                Point2 {
                    x: w * cam_point.x / self.ortho_view_width + half_w,
                    y: w * cam_point.y / self.ortho_view_width + half_h,
                }
            }
        }
    }

    /// Project a world-space point to the screen.
    ///
    /// Returns `Point2::NAN` when `clip` is set and the point is outside the
    /// depth range or the viewport.
    pub fn project_point(&self, point: Point3, clip: bool, round: bool) -> Point2 {
        self.try_project_point(point, clip, round).unwrap_or(Point2::NAN)
    }

    /// Like [`Camera::project_point`], but reports a clipped point as `None`.
    /// A degenerate pose still yields `Some` with NaN coordinates.
    pub fn try_project_point(&self, point: Point3, clip: bool, round: bool) -> Option<Point2> {
        let cam_point = self.world_to_camera(point);

        if clip && !self.depth_range().contains(cam_point) {
            return None;
        }

        let mut screen = self.image_coords(cam_point);

        if clip && !self.viewport().contains(screen) {
            return None;
        }

        if round {
            screen = screen.round();
        }

        Some(screen)
    }

    /// Project a world-space line to the screen.
    ///
    /// Returns `Line2::NAN` when `clip` is set and no part of the line is
    /// visible.
    pub fn project_line(&self, line: Line3, clip: bool, round: bool) -> Line2 {
        self.try_project_line(line, clip, round).unwrap_or(Line2::NAN)
    }

    pub fn try_project_line(&self, line: Line3, clip: bool, round: bool) -> Option<Line2> {
        let world_to_cam = self.transform.inverse();
        let mut cam_ends = (world_to_cam * line).endpoints();

        if clip {
            cam_ends = clip_line(&self.depth_range(), cam_ends)?;
        }

        let mut screen_ends = cam_ends.map(|p| self.image_coords(p));

        if clip {
            screen_ends = clip_line(&self.viewport(), screen_ends)?;
        }

        let screen = Line2::from(screen_ends);
        Some(if round { screen.round() } else { screen })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn cam() -> Camera {
        Camera::with_display(WIDTH_HI, HEIGHT_HI)
    }

    #[test]
    fn test_default_intrinsics() {
        let c = Camera::new();
        assert_eq!(c.proj_mode, ProjMode::Perspective);
        assert_eq!(c.focal_dist_px, 75.0);
        assert_eq!(c.near_dist, 0.1);
        assert_eq!(c.far_dist, 1000.0);
        assert_eq!((c.screen_width, c.screen_height), (WIDTH, HEIGHT));
    }

    #[test]
    fn test_world_to_camera_default_pose() {
        let p = cam().world_to_camera(Point3::new(0.0, 200.0, 0.0));
        assert!(p.x.abs() < EPS);
        assert!(p.y.abs() < EPS);
        assert!((p.z - 200.0).abs() < EPS);
    }

    #[test]
    fn test_depth_range_clamps() {
        let mut c = cam();
        c.near_dist = 0.0;
        c.far_dist = -5.0;
        let slab = c.depth_range();
        assert_eq!(slab.near, MIN_NEAR_DIST);
        assert_eq!(slab.far, MIN_NEAR_DIST);

        c.near_dist = 10.0;
        c.far_dist = 50.0;
        assert_eq!(c.depth_range(), DepthSlab::new(10.0, 50.0));
    }

    #[test]
    fn test_perspective_image_coords() {
        let p = cam().image_coords(Point3::new(10.0, -20.0, 100.0));
        assert!((p.x - (7.5 + 320.0)).abs() < EPS);
        assert!((p.y - (-15.0 + 240.0)).abs() < EPS);
    }

    #[test]
    fn test_ortho_scales_both_axes_by_width() {
        let mut c = cam();
        c.proj_mode = ProjMode::Orthographic;
        c.ortho_view_width = 64.0;
        let p = c.image_coords(Point3::new(1.0, 1.0, 100.0));
        // 640 / 64 = 10 px per unit on both axes
        assert!((p.x - 330.0).abs() < EPS);
        assert!((p.y - 250.0).abs() < EPS);
    }

    #[test]
    fn test_projection_modes_differ() {
        let mut c = cam();
        let cam_point = Point3::new(10.0, 0.0, 100.0);
        let persp = c.image_coords(cam_point);
        c.proj_mode = ProjMode::Orthographic;
        let ortho = c.image_coords(cam_point);
        // 75/100 != 640/100
        assert!((persp.x - ortho.x).abs() > 1.0);

        // Equal only when focal/z matches width/ortho_view_width
        c.ortho_view_width = 640.0 * 100.0 / 75.0;
        let ortho = c.image_coords(cam_point);
        assert!((persp.x - ortho.x).abs() < EPS);
    }

    #[test]
    fn test_odd_display_uses_integer_center() {
        let c = Camera::with_display(641, 481);
        let p = c.image_coords(Point3::new(0.0, 0.0, 10.0));
        assert_eq!(p, Point2::new(320.0, 240.0));
    }

    #[test]
    fn test_project_point_center() {
        let p = cam().project_point(Point3::new(0.0, 200.0, 0.0), true, true);
        assert_eq!(p, Point2::new(320.0, 240.0));
    }

    #[test]
    fn test_project_point_depth_clipped() {
        let c = cam();
        assert!(c.project_point(Point3::new(0.0, 2000.0, 0.0), true, true).is_nan());
        assert!(c.project_point(Point3::new(0.0, -10.0, 0.0), true, true).is_nan());
        assert_eq!(c.try_project_point(Point3::new(0.0, 0.05, 0.0), true, true), None);
    }

    #[test]
    fn test_project_point_viewport_clipped() {
        // Far off to the side at shallow depth
        let p = cam().project_point(Point3::new(500.0, 10.0, 0.0), true, true);
        assert!(p.is_nan());
    }

    #[test]
    fn test_project_point_without_clip() {
        let p = cam().project_point(Point3::new(0.0, 2000.0, 0.0), false, true);
        assert_eq!(p, Point2::new(320.0, 240.0));
    }

    #[test]
    fn test_project_point_without_round() {
        let p = cam().project_point(Point3::new(1.0, 100.0, 0.0), true, false);
        assert!((p.x - 320.75).abs() < EPS);
    }

    #[test]
    fn test_project_line_fully_visible_unchanged() {
        let c = cam();
        let line = Line3::new(Point3::new(-10.0, 100.0, 5.0), Point3::new(10.0, 100.0, -5.0));
        let projected = c.project_line(line, true, false);
        let unclipped = c.project_line(line, false, false);
        assert!((projected.p0.x - unclipped.p0.x).abs() < EPS);
        assert!((projected.p1.y - unclipped.p1.y).abs() < EPS);
        assert!((projected.p0.x - 312.5).abs() < EPS);
        assert!((projected.p1.x - 327.5).abs() < EPS);
    }

    #[test]
    fn test_project_line_far_rejected() {
        let line = Line3::new(Point3::new(0.0, 2000.0, 0.0), Point3::new(10.0, 2500.0, 0.0));
        assert!(cam().project_line(line, true, true).is_nan());
        assert_eq!(cam().try_project_line(line, true, true), None);
    }

    #[test]
    fn test_project_line_viewport_rejected() {
        // Visible depth but entirely left of the screen
        let line = Line3::new(Point3::new(-500.0, 10.0, 0.0), Point3::new(-400.0, 20.0, 0.0));
        assert!(cam().project_line(line, true, true).is_nan());
    }

    #[test]
    fn test_project_line_viewport_clipped() {
        let line = Line3::new(Point3::new(-1000.0, 100.0, 0.0), Point3::new(1000.0, 100.0, 0.0));
        let l = cam().project_line(line, true, true);
        assert_eq!(l.p0, Point2::new(0.0, 240.0));
        assert_eq!(l.p1, Point2::new(639.0, 240.0));
    }
}
