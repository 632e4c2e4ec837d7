// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene file importer

use crate::host::MemoryModel;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a JSON scene description into an in-memory host model
pub fn parse_scene(source: &str) -> Result<MemoryModel> {
    let model: MemoryModel = serde_json::from_str(source).context("Invalid scene JSON")?;
    model.validate().context("Inconsistent scene description")?;
    Ok(model)
}

/// Import a `.json` scene file
pub fn import_scene_file(path: impl AsRef<Path>) -> Result<MemoryModel> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {:?}", path))?;

    parse_scene(&source).with_context(|| format!("Failed to load scene file: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostModel;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCENE: &str = r#"{
        "active_view": "{3D}",
        "documents": [
            {
                "title": "Main.rvt",
                "categories": [ { "id": 1, "name": "Walls" } ],
                "materials": [ { "id": 5, "name": "Brick", "color": { "r": 200, "g": 80, "b": 40 } } ],
                "views": [ { "name": "{3D}", "hidden": [2] } ],
                "links": [ "Structure.rvt" ],
                "elements": [
                    { "id": 1, "category": 1, "geometry": { "solid": { "faces": [] } } },
                    { "id": 2, "geometry": { "composite": [] } }
                ]
            },
            { "title": "Structure" }
        ]
    }"#;

    #[test]
    fn test_import_scene_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{}", SCENE)?;

        let model = import_scene_file(file.path())?;
        assert_eq!(model.open_documents().len(), 2);
        assert_eq!(model.active_view_name(), Some("{3D}"));
        assert_eq!(model.link_references(model.active_document()), vec!["Structure.rvt"]);

        Ok(())
    }

    #[test]
    fn test_parse_scene_rejects_bad_active_document() {
        let source = r#"{ "active_document": 3, "documents": [ { "title": "A" } ] }"#;
        assert!(parse_scene(source).is_err());
    }

    #[test]
    fn test_parse_scene_rejects_malformed_json() {
        assert!(parse_scene("{ \"documents\": [").is_err());
    }
}
