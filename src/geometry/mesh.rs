// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face meshes and the triangle records handed to the writers

use crate::error::GeometryFault;
use crate::utils::math::facet_normal;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// RGB color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into the 16-bit binary STL attribute: bit 15 clear, then 5 bits
    /// each of blue, green and red from high to low
    pub fn to_rgb555(&self) -> u16 {
        let r = (self.r >> 3) as u16;
        let g = (self.g >> 3) as u16;
        let b = (self.b >> 3) as u16;
        (b << 10) | (g << 5) | r
    }
}

/// Triangulated patch produced by a face
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaceMesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<[usize; 3]>,
}

impl FaceMesh {
    pub fn new(vertices: Vec<Point3<f64>>, triangles: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    pub fn add_triangle(&mut self, indices: [usize; 3]) {
        self.triangles.push(indices);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Look up the three corner positions of triangle `index`
    pub fn triangle_vertices(&self, index: usize) -> Result<[Point3<f64>; 3], GeometryFault> {
        let indices = self
            .triangles
            .get(index)
            .ok_or(GeometryFault::TriangleOutOfRange {
                index,
                len: self.triangles.len(),
            })?;

        let mut corners = [Point3::origin(); 3];
        for (corner, &vertex) in corners.iter_mut().zip(indices.iter()) {
            *corner = *self
                .vertices
                .get(vertex)
                .ok_or(GeometryFault::VertexOutOfRange {
                    index: vertex,
                    len: self.vertices.len(),
                })?;
        }
        Ok(corners)
    }
}

/// Oriented triangle in final output space and unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub normal: Vector3<f64>,
    pub vertices: [Point3<f64>; 3],
    pub color: Option<Color>,
}

impl Triangle {
    /// Build a triangle whose normal follows the vertex winding
    pub fn from_vertices(vertices: [Point3<f64>; 3]) -> Self {
        Self {
            normal: facet_normal(&vertices[0], &vertices[1], &vertices[2]),
            vertices,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb555_packing() {
        assert_eq!(Color::new(255, 0, 0).to_rgb555(), 0x001F);
        assert_eq!(Color::new(0, 255, 0).to_rgb555(), 0x03E0);
        assert_eq!(Color::new(0, 0, 255).to_rgb555(), 0x7C00);
        assert_eq!(Color::new(255, 255, 255).to_rgb555(), 0x7FFF);
        assert_eq!(Color::new(7, 7, 7).to_rgb555(), 0);
    }

    #[test]
    fn test_triangle_vertices_out_of_range() {
        let mesh = FaceMesh::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            vec![[0, 1, 2]],
        );
        assert_eq!(
            mesh.triangle_vertices(0),
            Err(GeometryFault::VertexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            mesh.triangle_vertices(1),
            Err(GeometryFault::TriangleOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_triangle_normal_follows_winding() {
        let tri = Triangle::from_vertices([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(tri.normal, Vector3::new(0.0, 0.0, 1.0));

        let flipped = Triangle::from_vertices([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ]);
        assert_eq!(flipped.normal, Vector3::new(0.0, 0.0, -1.0));
    }
}
