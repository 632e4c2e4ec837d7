// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! stl-extract
//!
//! Flattens the instanced geometry of a BIM scene graph into oriented
//! triangles and streams them to binary or ASCII STL, with optional
//! material colors, shared coordinates and unit conversion.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod host;
pub mod io;
pub mod scene;
pub mod utils;

pub use config::ExportConfig;
pub use error::{ExportError, GeometryFault, SceneError, WriterError};
pub use extract::{
    CancelToken, ExportOutcome, ExportReport, ExportScope, ExportSettings, MeshExtractor,
};
pub use geometry::{Color, LengthUnit, Primitive, Triangle};
pub use host::{HostModel, MemoryDocument, MemoryModel};
pub use io::{import_scene_file, inspect_stl, Encoding, TriangleWriter};
pub use scene::{GeometryNode, Transform};

use std::path::Path;

/// Export every document of `host` selected by `settings` to `output`
pub fn export<H: HostModel + ?Sized>(
    host: &H,
    settings: &ExportSettings,
    output: impl AsRef<Path>,
) -> ExportOutcome {
    MeshExtractor::new(host).export(settings, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_basic_cube() {
        let mut doc = MemoryDocument::new("Main");
        doc.add_element(host::Element::new(
            1,
            None,
            GeometryNode::Solid(Primitive::cuboid(Vector3::new(10.0, 10.0, 10.0), true).to_solid()),
        ));
        let mut model = MemoryModel::new();
        model.add_document(doc);

        let dir = tempfile::TempDir::new().unwrap();
        let outcome = export(&model, &ExportSettings::default(), dir.path().join("cube.stl"));
        assert!(outcome.is_success());
    }
}
