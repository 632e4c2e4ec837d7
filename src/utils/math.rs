// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point3, Vector3};

/// Below this length a facet normal is treated as undefined
pub const NORMAL_EPSILON: f64 = 1e-12;

/// Unit normal of the facet `p0 -> p1 -> p2`, computed as
/// `(p1 - p0) × (p2 - p1)`. Zero-area facets get a zero normal.
pub fn facet_normal(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    let e1 = p1 - p0;
    let e2 = p2 - p1;
    e1.cross(&e2)
        .try_normalize(NORMAL_EPSILON)
        // adding +0.0 turns -0.0 into 0.0
        .map(|n| n.map(|c| c + 0.0))
        .unwrap_or_else(Vector3::zeros)
}

/// True when every coordinate of the point is finite
pub fn is_finite_point(p: &Point3<f64>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}
