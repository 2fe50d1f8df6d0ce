//! Outcode (Cohen-Sutherland) clipping
//!
//! One loop serves both the camera-space depth slab and the screen
//! rectangle. A region reports an outcode bitset for a point and knows how to
//! snap a segment onto the first boundary named by a code; `clip_line` drives
//! the accept / reject / clip-one-end state machine on an endpoint array.

use tracing::trace;

use super::math::{Point2, Point3};

/// A convex clip region bounded by axis-aligned planes or edges
pub trait ClipRegion {
    type Point: Copy;

    /// Number of outcode bits the region uses
    const BOUNDARIES: u32;

    /// Bitset of boundaries the point lies outside of (0 = inside)
    fn outcode(&self, p: Self::Point) -> u8;

    /// Point on segment `a -> b` lying exactly on the first boundary set in
    /// `code`. Returns `None` when the segment has zero span along the
    /// bounded axis.
    fn intersect(&self, code: u8, a: Self::Point, b: Self::Point) -> Option<Self::Point>;
}

/// Parameter of `bound` along `start -> end`, `None` for a zero span
#[inline]
fn line_t(bound: f32, start: f32, end: f32) -> Option<f32> {
    let span = end - start;
    if span == 0.0 {
        return None;
    }
    Some((bound - start) / span)
}

/// Camera-space slab `near <= z <= far`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSlab {
    pub near: f32,
    pub far: f32,
}

impl DepthSlab {
    pub const NEAR: u8 = 1 << 0;
    pub const FAR: u8 = 1 << 1;

    pub fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    pub fn contains(&self, p: Point3) -> bool {
        clip_point(self, p)
    }
}

impl ClipRegion for DepthSlab {
    type Point = Point3;
    const BOUNDARIES: u32 = 2;

    fn outcode(&self, p: Point3) -> u8 {
        let mut code = 0;
        if p.z < self.near {
            code |= Self::NEAR;
        }
        if p.z > self.far {
            code |= Self::FAR;
        }
        code
    }

    fn intersect(&self, code: u8, a: Point3, b: Point3) -> Option<Point3> {
        let bound = if code & Self::NEAR != 0 { self.near } else { self.far };
        let t = line_t(bound, a.z, b.z)?;
        Some(Point3 {
            z: bound,
            ..a.lerp(b, t)
        })
    }
}

/// Screen rectangle `[0, max_x] x [0, max_y]` in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub max_x: f32,
    pub max_y: f32,
}

impl Viewport {
    pub const LEFT: u8 = 1 << 0;
    pub const RIGHT: u8 = 1 << 1;
    pub const TOP: u8 = 1 << 2;
    pub const BOTTOM: u8 = 1 << 3;

    /// Viewport covering every pixel of a `width x height` display
    pub fn from_screen(width: u32, height: u32) -> Self {
        Self {
            max_x: width as f32 - 1.0,
            max_y: height as f32 - 1.0,
        }
    }

    pub fn contains(&self, p: Point2) -> bool {
        clip_point(self, p)
    }
}

impl ClipRegion for Viewport {
    type Point = Point2;
    const BOUNDARIES: u32 = 4;

    fn outcode(&self, p: Point2) -> u8 {
        let mut code = 0;
        if p.x < 0.0 {
            code |= Self::LEFT;
        }
        if p.x > self.max_x {
            code |= Self::RIGHT;
        }
        if p.y < 0.0 {
            code |= Self::TOP;
        }
        if p.y > self.max_y {
            code |= Self::BOTTOM;
        }
        code
    }

    fn intersect(&self, code: u8, a: Point2, b: Point2) -> Option<Point2> {
        if code & (Self::LEFT | Self::RIGHT) != 0 {
            let bound = if code & Self::LEFT != 0 { 0.0 } else { self.max_x };
            let t = line_t(bound, a.x, b.x)?;
            Some(Point2::new(bound, a.y + t * (b.y - a.y)))
        } else {
            let bound = if code & Self::TOP != 0 { 0.0 } else { self.max_y };
            let t = line_t(bound, a.y, b.y)?;
            Some(Point2::new(a.x + t * (b.x - a.x), bound))
        }
    }
}

/// True if a single point lies inside the region (boundaries inclusive)
pub fn clip_point<R: ClipRegion>(region: &R, p: R::Point) -> bool {
    region.outcode(p) == 0
}

/// Clip a segment to a region.
///
/// Returns the visible part, or `None` if nothing survives. Either endpoint
/// may be the one replaced, so only the shape of the result is meaningful.
/// Each step snaps one endpoint exactly onto a boundary; the loop gives up
/// (rejects) after two steps per boundary or on a zero-span boundary crossing.
pub fn clip_line<R: ClipRegion>(region: &R, endpoints: [R::Point; 2]) -> Option<[R::Point; 2]> {
    let mut ends = endpoints;
    let max_steps = 2 * R::BOUNDARIES;
    let mut steps = 0;

    loop {
        let codes = [region.outcode(ends[0]), region.outcode(ends[1])];

        if codes[0] | codes[1] == 0 {
            // Trivially accept
            return Some(ends);
        }
        if codes[0] & codes[1] != 0 {
            // Trivially reject
            return None;
        }
        if steps == max_steps {
            trace!(steps, "clip did not converge; rejecting segment");
            return None;
        }
        steps += 1;

        // Clip one end
        let i = if codes[0] != 0 { 0 } else { 1 };
        match region.intersect(codes[i], ends[0], ends[1]) {
            Some(p) => ends[i] = p,
            None => {
                trace!(code = codes[i], "zero-span clip boundary; rejecting segment");
                return None;
            }
        }
    }
}
