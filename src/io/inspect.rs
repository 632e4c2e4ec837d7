// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Read an STL file back and summarize it

use crate::geometry::BoundingBox;
use anyhow::{Context, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Summary of an STL file on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StlSummary {
    pub triangle_count: usize,
    /// Triangles whose stored normal is the zero vector
    pub degenerate_normals: usize,
    pub bounding_box: BoundingBox,
}

/// Parse an STL file (binary or ASCII) and collect its triangle count and bounds
pub fn inspect_stl(path: impl AsRef<Path>) -> Result<StlSummary> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open STL file: {:?}", path))?;
    let mut reader = BufReader::new(file);

    let triangles = stl_io::create_stl_reader(&mut reader)
        .with_context(|| format!("Failed to read STL header: {:?}", path))?;

    let mut summary = StlSummary {
        triangle_count: 0,
        degenerate_normals: 0,
        bounding_box: BoundingBox::empty(),
    };

    for triangle in triangles {
        let triangle = triangle.with_context(|| format!("Malformed STL record in {:?}", path))?;
        summary.triangle_count += 1;

        let normal = triangle.normal;
        if normal[0] == 0.0 && normal[1] == 0.0 && normal[2] == 0.0 {
            summary.degenerate_normals += 1;
        }
        for vertex in triangle.vertices.iter() {
            summary
                .bounding_box
                .expand_to_include(&Point3::new(vertex[0], vertex[1], vertex[2]));
        }
    }

    Ok(summary)
}
