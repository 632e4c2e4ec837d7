// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Affine transforms carried down the scene graph

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// 3D Vector type alias
pub type Vec3 = Vector3<f64>;

/// Affine map of 3-space stored as a homogeneous 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TransformOp>", into = "Vec<TransformOp>")]
pub struct Transform {
    matrix: Matrix4<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn translation(offset: Vec3) -> Self {
        TransformOp::Translate(offset).into()
    }

    /// Rotation in degrees about the X, Y and Z axes (applied X first)
    pub fn rotation(degrees: Vec3) -> Self {
        TransformOp::Rotate(degrees).into()
    }

    pub fn scale(factors: Vec3) -> Self {
        TransformOp::Scale(factors).into()
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix4::identity()
    }

    /// Compose `self ∘ local`: `local` is applied first, then `self`
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * local.matrix,
        }
    }

    /// Map a point through the transform
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<TransformOp> for Transform {
    fn from(op: TransformOp) -> Self {
        Self {
            matrix: op.to_matrix(),
        }
    }
}

impl From<Vec<TransformOp>> for Transform {
    fn from(ops: Vec<TransformOp>) -> Self {
        ops.into_iter()
            .fold(Transform::identity(), |acc, op| acc.compose(&op.into()))
    }
}

impl From<Transform> for Vec<TransformOp> {
    fn from(transform: Transform) -> Self {
        if transform.is_identity() {
            Vec::new()
        } else {
            vec![TransformOp::Matrix(transform.matrix)]
        }
    }
}

/// Transformation operations as they appear in scene descriptions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOp {
    Translate(Vec3),
    Rotate(Vec3),
    Scale(Vec3),
    Mirror(Vec3),
    Matrix(Matrix4<f64>),
}

impl TransformOp {
    /// Convert transformation to a 4x4 matrix
    pub fn to_matrix(&self) -> Matrix4<f64> {
        match self {
            TransformOp::Translate(v) => Matrix4::new_translation(v),
            TransformOp::Rotate(angles) => {
                let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x.to_radians());
                let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y.to_radians());
                let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z.to_radians());
                (rz * ry * rx).to_homogeneous()
            }
            TransformOp::Scale(s) => Matrix4::new_nonuniform_scaling(s),
            TransformOp::Mirror(axis) => {
                let mut m = Matrix4::identity();
                if axis.x != 0.0 {
                    m[(0, 0)] = -1.0;
                }
                if axis.y != 0.0 {
                    m[(1, 1)] = -1.0;
                }
                if axis.z != 0.0 {
                    m[(2, 2)] = -1.0;
                }
                m
            }
            TransformOp::Matrix(m) => *m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compose_applies_local_first() {
        let outer = Transform::translation(Vec3::new(10.0, 0.0, 0.0));
        let local = Transform::scale(Vec3::new(2.0, 2.0, 2.0));
        let p = outer.compose(&local).apply(&Point3::new(1.0, 1.0, 1.0));

        assert_relative_eq!(p, Point3::new(12.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotation_is_not_commutative() {
        let a = Transform::rotation(Vec3::new(90.0, 0.0, 0.0));
        let b = Transform::rotation(Vec3::new(0.0, 0.0, 90.0));
        let p = Point3::new(1.0, 0.0, 0.0);

        let ab = a.compose(&b).apply(&p);
        let ba = b.compose(&a).apply(&p);

        assert_relative_eq!(ab, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(ba, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_op_list_composes_left_to_right() {
        let ops = vec![
            TransformOp::Translate(Vec3::new(0.0, 0.0, 5.0)),
            TransformOp::Mirror(Vec3::new(0.0, 0.0, 1.0)),
        ];
        let transform = Transform::from(ops);
        let p = transform.apply(&Point3::new(0.0, 0.0, 1.0));

        assert_relative_eq!(p, Point3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_serde_roundtrip_keeps_matrix() {
        let transform = Transform::rotation(Vec3::new(0.0, 30.0, 0.0))
            .compose(&Transform::translation(Vec3::new(1.0, 2.0, 3.0)));
        let json = serde_json::to_string(&transform).unwrap();
        let back: Transform = serde_json::from_str(&json).unwrap();

        assert_relative_eq!(*back.matrix(), *transform.matrix());
    }
}
