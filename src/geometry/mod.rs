// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - face meshes, triangles, units and output coordinates

mod bbox;
mod coordinates;
mod mesh;
mod primitives;
mod triangulation;
mod units;

pub use bbox::BoundingBox;
pub use coordinates::{CoordinateResolver, CoordinateSpace};
pub use mesh::{Color, FaceMesh, Triangle};
pub use primitives::Primitive;
pub use triangulation::triangulate_planar_polygon;
pub use units::LengthUnit;
