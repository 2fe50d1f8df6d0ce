//! Affine transforms: a 3x3 linear block plus a translation
//!
//! A `Transform` maps `p' = M·p + t`. It is equivalent to the 4x4 homogeneous
//! matrix `[M t; 0 1]`, and composition follows that block product.

use serde::{Deserialize, Serialize};
use std::ops::Mul;

use super::math::{Line3, Point3};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Row-major linear block
    pub m: [[f32; 3]; 3],
    pub translation: Point3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        translation: Point3::ZERO,
    };

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Build from explicit matrix entries and translation
    pub const fn new(m: [[f32; 3]; 3], translation: Point3) -> Self {
        Self { m, translation }
    }

    /// Build from euler angles (degrees), per-axis scale and position.
    /// Rotation order: Z * Y * X (roll about X first, then pitch, then yaw).
    /// Each scale factor multiplies the matching matrix column.
    pub fn from_euler(angles: Point3, scale: Point3, position: Point3) -> Self {
        let (sx, cx) = angles.x.to_radians().sin_cos();
        let (sy, cy) = angles.y.to_radians().sin_cos();
        let (sz, cz) = angles.z.to_radians().sin_cos();

        Self {
            m: [
                [
                    scale.x * cy * cz,
                    scale.y * (sx * sy * cz - cx * sz),
                    scale.z * (sx * sz + cx * sy * cz),
                ],
                [
                    scale.x * cy * sz,
                    scale.y * (sx * sy * sz + cx * cz),
                    scale.z * (cx * sy * sz - sx * cz),
                ],
                [
                    scale.x * -sy,
                    scale.y * sx * cy,
                    scale.z * cx * cy,
                ],
            ],
            translation: position,
        }
    }

    pub fn position(&self) -> Point3 {
        self.translation
    }

    /// Determinant of the linear block
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
            + m[0][1] * (m[1][2] * m[2][0] - m[1][0] * m[2][2])
            + m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
    }

    /// Analytic inverse via the adjugate.
    ///
    /// The linear block must be invertible. A singular block is not checked
    /// and fills the result with NaN/Inf; use [`Transform::determinant`] first
    /// when the input is not known to be well conditioned.
    pub fn inverse(&self) -> Transform {
        let [[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]] = self.m;

        let n00 = m11 * m22 - m12 * m21;
        let n01 = m02 * m21 - m01 * m22;
        let n02 = m01 * m12 - m02 * m11;
        let n10 = m12 * m20 - m10 * m22;
        let n11 = m00 * m22 - m02 * m20;
        let n12 = m02 * m10 - m00 * m12;
        let n20 = m10 * m21 - m11 * m20;
        let n21 = m01 * m20 - m00 * m21;
        let n22 = m00 * m11 - m01 * m10;

        let det = m02 * n20 + m01 * n10 + m00 * n00;

        let n = [
            [n00 / det, n01 / det, n02 / det],
            [n10 / det, n11 / det, n12 / det],
            [n20 / det, n21 / det, n22 / det],
        ];

        // r = -N * t
        let t = self.translation;
        let translation = Point3::new(
            -(n[0][0] * t.x + n[0][1] * t.y + n[0][2] * t.z),
            -(n[1][0] * t.x + n[1][1] * t.y + n[1][2] * t.z),
            -(n[2][0] * t.x + n[2][1] * t.y + n[2][2] * t.z),
        );

        Transform { m: n, translation }
    }

    /// Apply only the linear block
    #[inline]
    fn rotate(&self, p: Point3) -> Point3 {
        Point3::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2] * p.z,
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2] * p.z,
            self.m[2][0] * p.x + self.m[2][1] * p.y + self.m[2][2] * p.z,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// `a * b` applies `b` first, then `a`
impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, out) in row.iter_mut().enumerate() {
                *out = self.m[i][0] * rhs.m[0][j]
                    + self.m[i][1] * rhs.m[1][j]
                    + self.m[i][2] * rhs.m[2][j];
            }
        }
        Transform {
            m,
            translation: self.rotate(rhs.translation) + self.translation,
        }
    }
}

impl Mul<Point3> for Transform {
    type Output = Point3;
    fn mul(self, p: Point3) -> Point3 {
        self.rotate(p) + self.translation
    }
}

impl Mul<Line3> for Transform {
    type Output = Line3;
    fn mul(self, line: Line3) -> Line3 {
        Line3::new(self * line.p0, self * line.p1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn assert_point_near(a: Point3, b: Point3) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.z - b.z).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    fn assert_transform_near(a: &Transform, b: &Transform) {
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (a.m[i][j] - b.m[i][j]).abs() < EPS,
                    "m[{}][{}]: {} != {}",
                    i,
                    j,
                    a.m[i][j],
                    b.m[i][j]
                );
            }
        }
        assert_point_near(a.translation, b.translation);
    }

    fn sample_transforms() -> Vec<Transform> {
        vec![
            Transform::from_euler(
                Point3::new(30.0, -45.0, 60.0),
                Point3::new(1.0, 2.0, 0.5),
                Point3::new(10.0, -5.0, 3.0),
            ),
            Transform::from_euler(
                Point3::new(-90.0, 0.0, 0.0),
                Point3::ONE,
                Point3::ZERO,
            ),
            Transform::from_euler(
                Point3::new(170.0, 80.0, -135.0),
                Point3::new(3.0, 3.0, 3.0),
                Point3::new(-100.0, 250.0, 7.5),
            ),
        ]
    }

    #[test]
    fn test_identity_leaves_point_unchanged() {
        let p = Point3::new(1.5, -2.0, 9.0);
        assert_eq!(Transform::identity() * p, p);
    }

    #[test]
    fn test_from_euler_zero_angles_is_scale() {
        let t = Transform::from_euler(
            Point3::ZERO,
            Point3::new(2.0, 3.0, 4.0),
            Point3::new(1.0, 1.0, 1.0),
        );
        let p = t * Point3::new(1.0, 1.0, 1.0);
        assert_point_near(p, Point3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_from_euler_yaw_rotates_x_to_y() {
        let t = Transform::from_euler(Point3::new(0.0, 0.0, 90.0), Point3::ONE, Point3::ZERO);
        assert_point_near(t * Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_negative_roll_points_z_along_world_y() {
        let t = Transform::from_euler(Point3::new(-90.0, 0.0, 0.0), Point3::ONE, Point3::ZERO);
        assert_point_near(t * Point3::new(0.0, 0.0, 1.0), Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-40.0, 12.5, 300.0),
        ];
        for t in sample_transforms() {
            let inv = t.inverse();
            for p in points {
                assert_point_near(inv * (t * p), p);
            }
        }
    }

    #[test]
    fn test_inverse_composes_to_identity() {
        for t in sample_transforms() {
            assert_transform_near(&(t * t.inverse()), &Transform::IDENTITY);
            assert_transform_near(&(t.inverse() * t), &Transform::IDENTITY);
        }
    }

    #[test]
    fn test_determinant_of_scaled_rotation() {
        let t = Transform::from_euler(
            Point3::new(10.0, 20.0, 30.0),
            Point3::new(2.0, 3.0, 4.0),
            Point3::ZERO,
        );
        assert!((t.determinant() - 24.0).abs() < EPS);
    }

    #[test]
    fn test_singular_inverse_is_not_finite() {
        let t = Transform::new([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]], Point3::ZERO);
        assert_eq!(t.determinant(), 0.0);
        let inv = t.inverse();
        assert!(inv.m.iter().flatten().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_composition_identity() {
        for t in sample_transforms() {
            assert_transform_near(&(Transform::IDENTITY * t), &t);
            assert_transform_near(&(t * Transform::IDENTITY), &t);
        }
    }

    #[test]
    fn test_composition_associative() {
        let [a, b, c]: [Transform; 3] = sample_transforms().try_into().unwrap();
        assert_transform_near(&((a * b) * c), &(a * (b * c)));
    }

    #[test]
    fn test_composition_applies_rhs_first() {
        let translate = Transform::new(Transform::IDENTITY.m, Point3::new(5.0, 0.0, 0.0));
        let yaw = Transform::from_euler(Point3::new(0.0, 0.0, 90.0), Point3::ONE, Point3::ZERO);
        // Translate first, then yaw: (1,0,0) -> (6,0,0) -> (0,6,0)
        assert_point_near((yaw * translate) * Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 6.0, 0.0));
        // Yaw first, then translate: (1,0,0) -> (0,1,0) -> (5,1,0)
        assert_point_near((translate * yaw) * Point3::new(1.0, 0.0, 0.0), Point3::new(5.0, 1.0, 0.0));
    }

    #[test]
    fn test_line_application_preserves_order() {
        let t = Transform::new(Transform::IDENTITY.m, Point3::new(0.0, 0.0, 1.0));
        let line = t * Line3::new(Point3::ZERO, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(line.p0, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(line.p1, Point3::new(1.0, 0.0, 1.0));
    }
}
