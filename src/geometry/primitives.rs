// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Solid builders for simple bodies

use crate::scene::{Face, FaceSurface, Solid};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Simple parametric bodies made of planar faces
pub enum Primitive {
    Cuboid { size: Vector3<f64>, center: bool },
    Prism { h: f64, r: f64, sides: u32 },
}

impl Primitive {
    pub fn cuboid(size: Vector3<f64>, center: bool) -> Self {
        Self::Cuboid { size, center }
    }

    /// Regular prism standing on the XY plane
    pub fn prism(h: f64, r: f64, sides: u32) -> Self {
        let sides = if sides >= 3 { sides } else { 32 };
        Self::Prism { h, r, sides }
    }

    pub fn to_solid(&self) -> Solid {
        match self {
            Self::Cuboid { size, center } => generate_cuboid(*size, *center),
            Self::Prism { h, r, sides } => generate_prism(*h, *r, *sides),
        }
    }
}

fn polygon_face(outline: Vec<Point3<f64>>) -> Face {
    Face::new(FaceSurface::Polygon {
        outline,
        holes: Vec::new(),
    })
}

fn generate_cuboid(size: Vector3<f64>, center: bool) -> Solid {
    let (min_x, max_x) = if center {
        (-size.x / 2.0, size.x / 2.0)
    } else {
        (0.0, size.x)
    };
    let (min_y, max_y) = if center {
        (-size.y / 2.0, size.y / 2.0)
    } else {
        (0.0, size.y)
    };
    let (min_z, max_z) = if center {
        (-size.z / 2.0, size.z / 2.0)
    } else {
        (0.0, size.z)
    };

    // 8 corners of the box
    let positions = [
        Point3::new(min_x, min_y, min_z),
        Point3::new(max_x, min_y, min_z),
        Point3::new(max_x, max_y, min_z),
        Point3::new(min_x, max_y, min_z),
        Point3::new(min_x, min_y, max_z),
        Point3::new(max_x, min_y, max_z),
        Point3::new(max_x, max_y, max_z),
        Point3::new(min_x, max_y, max_z),
    ];

    // Counter-clockwise seen from outside
    let faces = [
        [4, 5, 6, 7], // z+
        [0, 3, 2, 1], // z-
        [1, 2, 6, 5], // x+
        [0, 4, 7, 3], // x-
        [3, 7, 6, 2], // y+
        [0, 1, 5, 4], // y-
    ];

    Solid::new(
        faces
            .iter()
            .map(|quad| polygon_face(quad.iter().map(|&i| positions[i]).collect()))
            .collect(),
    )
}

fn generate_prism(h: f64, r: f64, sides: u32) -> Solid {
    let ring = |z: f64| -> Vec<Point3<f64>> {
        (0..sides)
            .map(|i| {
                let theta = 2.0 * PI * i as f64 / sides as f64;
                Point3::new(r * theta.cos(), r * theta.sin(), z)
            })
            .collect()
    };

    let bottom = ring(0.0);
    let top = ring(h);
    let n = sides as usize;

    let mut faces = Vec::with_capacity(n + 2);
    faces.push(polygon_face(top.clone()));
    faces.push(polygon_face(bottom.iter().rev().copied().collect()));
    for i in 0..n {
        let j = (i + 1) % n;
        faces.push(polygon_face(vec![bottom[i], bottom[j], top[j], top[i]]));
    }

    Solid::new(faces)
}
