// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar polygon triangulation
//!
//! Wrapper around earcutr. Polygons are projected onto the axis plane their
//! normal is most aligned with, triangulated in 2D, and the resulting
//! triangles are re-oriented to follow the outline's winding in 3D.

use super::FaceMesh;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// Newell normal of a closed loop (not normalized)
fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal
}

/// Indices of the two axes kept when projecting along `normal`
fn projection_axes(normal: &Vector3<f64>) -> (usize, usize) {
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    if az >= ax && az >= ay {
        (0, 1)
    } else if ay >= ax {
        (2, 0)
    } else {
        (1, 2)
    }
}

/// Triangulate a planar outline with optional holes.
///
/// Returns `None` when the polygon is degenerate or earcut fails, which the
/// caller treats the same as a face without a mesh.
pub fn triangulate_planar_polygon(
    outline: &[Point3<f64>],
    holes: &[Vec<Point3<f64>>],
) -> Option<FaceMesh> {
    if outline.len() < 3 {
        return None;
    }

    let normal = newell_normal(outline);
    if normal.norm() < f64::EPSILON {
        return None;
    }
    let (u, v) = projection_axes(&normal);

    let valid_holes: Vec<&Vec<Point3<f64>>> = holes.iter().filter(|h| h.len() >= 3).collect();
    let total_points = outline.len() + valid_holes.iter().map(|h| h.len()).sum::<usize>();

    let mut mesh = FaceMesh::with_capacity(total_points, total_points);
    let mut flat = Vec::with_capacity(total_points * 2);
    for p in outline {
        mesh.add_vertex(*p);
        flat.push(p[u]);
        flat.push(p[v]);
    }

    let mut hole_indices = Vec::with_capacity(valid_holes.len());
    for hole in valid_holes {
        hole_indices.push(flat.len() / 2);
        for p in hole {
            mesh.add_vertex(*p);
            flat.push(p[u]);
            flat.push(p[v]);
        }
    }

    let indices = match earcutr::earcut(&flat, &hole_indices, 2) {
        Ok(indices) => indices,
        Err(e) => {
            debug!(error = ?e, "Polygon triangulation failed");
            return None;
        }
    };

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let p0 = mesh.vertices[a];
        let facet = (mesh.vertices[b] - p0).cross(&(mesh.vertices[c] - p0));
        if facet.dot(&normal) < 0.0 {
            mesh.add_triangle([a, c, b]);
        } else {
            mesh.add_triangle([a, b, c]);
        }
    }

    if mesh.triangle_count() == 0 {
        None
    } else {
        Some(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::facet_normal;

    fn square(z: f64, reversed: bool) -> Vec<Point3<f64>> {
        let mut pts = vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(2.0, 0.0, z),
            Point3::new(2.0, 2.0, z),
            Point3::new(0.0, 2.0, z),
        ];
        if reversed {
            pts.reverse();
        }
        pts
    }

    #[test]
    fn test_square_becomes_two_triangles() {
        let mesh = triangulate_planar_polygon(&square(0.0, false), &[]).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_triangles_follow_outline_winding() {
        for reversed in [false, true] {
            let mesh = triangulate_planar_polygon(&square(1.0, reversed), &[]).unwrap();
            let expected_z = if reversed { -1.0 } else { 1.0 };
            for i in 0..mesh.triangle_count() {
                let [a, b, c] = mesh.triangle_vertices(i).unwrap();
                assert_eq!(facet_normal(&a, &b, &c).z, expected_z);
            }
        }
    }

    #[test]
    fn test_vertical_polygon_is_projected() {
        let outline = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let mesh = triangulate_planar_polygon(&outline, &[]).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_polygon_with_hole() {
        let outline = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ];
        let hole = vec![
            Point3::new(4.0, 4.0, 0.0),
            Point3::new(4.0, 6.0, 0.0),
            Point3::new(6.0, 6.0, 0.0),
            Point3::new(6.0, 4.0, 0.0),
        ];
        let mesh = triangulate_planar_polygon(&outline, &[hole]).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn test_degenerate_polygon_has_no_mesh() {
        let collinear = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(triangulate_planar_polygon(&collinear, &[]).is_none());
        assert!(triangulate_planar_polygon(&collinear[..2], &[]).is_none());
    }
}
