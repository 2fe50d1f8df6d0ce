//! Point and line value types for the projection pipeline
//!
//! All geometry is single precision. A point or line whose coordinates are
//! NaN is the "not visible" sentinel returned by clipped projections.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// 2D screen-space point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const NAN: Point2 = Point2 { x: f32::NAN, y: f32::NAN };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// True if either coordinate is NaN
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Round both coordinates to the nearest integer value (ties away from zero)
    pub fn round(self) -> Point2 {
        Point2 {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

/// 3D world- or camera-space point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ZERO: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Point3 = Point3 { x: 1.0, y: 1.0, z: 1.0 };
    pub const NAN: Point3 = Point3 { x: f32::NAN, y: f32::NAN, z: f32::NAN };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub fn lerp(self, other: Point3, t: f32) -> Point3 {
        Point3 {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            z: self.z + t * (other.z - self.z),
        }
    }
}

impl Add for Point3 {
    type Output = Point3;
    fn add(self, other: Point3) -> Point3 {
        Point3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

/// Screen-space line segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Line2 {
    pub p0: Point2,
    pub p1: Point2,
}

impl Line2 {
    pub const NAN: Line2 = Line2 { p0: Point2::NAN, p1: Point2::NAN };

    pub fn new(p0: Point2, p1: Point2) -> Self {
        Self { p0, p1 }
    }

    pub fn is_nan(self) -> bool {
        self.p0.is_nan() || self.p1.is_nan()
    }

    pub fn round(self) -> Line2 {
        Line2 {
            p0: self.p0.round(),
            p1: self.p1.round(),
        }
    }
}

impl From<[Point2; 2]> for Line2 {
    fn from([p0, p1]: [Point2; 2]) -> Self {
        Self { p0, p1 }
    }
}

/// World- or camera-space line segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Line3 {
    pub p0: Point3,
    pub p1: Point3,
}

impl Line3 {
    pub const NAN: Line3 = Line3 { p0: Point3::NAN, p1: Point3::NAN };

    pub fn new(p0: Point3, p1: Point3) -> Self {
        Self { p0, p1 }
    }

    pub fn is_nan(self) -> bool {
        self.p0.is_nan() || self.p1.is_nan()
    }

    pub fn endpoints(self) -> [Point3; 2] {
        [self.p0, self.p1]
    }
}

impl From<[Point3; 2]> for Line3 {
    fn from([p0, p1]: [Point3; 2]) -> Self {
        Self { p0, p1 }
    }
}
