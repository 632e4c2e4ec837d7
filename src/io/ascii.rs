// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! ASCII STL writer

use super::writer::{open_output, Encoding, TriangleWriter, WriterState};
use crate::error::WriterError;
use crate::geometry::Triangle;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::error;

/// Writes triangles as `facet normal ... endfacet` text blocks.
///
/// The file opens with `solid ascii`. A closing `endsolid` line is only
/// written when requested with [`AsciiTriangleWriter::with_endsolid`].
pub struct AsciiTriangleWriter {
    path: PathBuf,
    endsolid: bool,
    sink: Option<BufWriter<File>>,
    state: WriterState,
    written: u32,
}

impl AsciiTriangleWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            endsolid: false,
            sink: None,
            state: WriterState::Unopened,
            written: 0,
        }
    }

    pub fn with_endsolid(mut self, endsolid: bool) -> Self {
        self.endsolid = endsolid;
        self
    }

    fn write_facet(sink: &mut impl Write, triangle: &Triangle) -> std::io::Result<()> {
        let n = &triangle.normal;
        writeln!(sink, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(sink, "    outer loop")?;
        for v in &triangle.vertices {
            writeln!(sink, " vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(sink, "   endloop")?;
        writeln!(sink, "  endfacet")
    }
}

impl TriangleWriter for AsciiTriangleWriter {
    fn encoding(&self) -> Encoding {
        Encoding::Ascii
    }

    fn state(&self) -> WriterState {
        self.state
    }

    fn create_file(&mut self) -> Result<(), WriterError> {
        if self.state != WriterState::Unopened {
            return Err(WriterError::AlreadyOpened);
        }

        let file = open_output(&self.path)?;
        let mut sink = BufWriter::new(file);
        writeln!(sink, "solid ascii").map_err(|e| WriterError::io(&self.path, e))?;

        self.sink = Some(sink);
        self.state = WriterState::Open;
        Ok(())
    }

    fn write_triangle(&mut self, triangle: &Triangle) -> Result<(), WriterError> {
        let sink = match (self.state, self.sink.as_mut()) {
            (WriterState::Open, Some(sink)) => sink,
            _ => return Err(WriterError::NotOpen),
        };
        Self::write_facet(sink, triangle).map_err(|e| WriterError::io(&self.path, e))?;
        self.written += 1;
        Ok(())
    }

    fn write_triangle_count(&mut self, count: u32) -> Result<(), WriterError> {
        error!(count, path = %self.path.display(), "Triangle count requested for ASCII STL output");
        Err(WriterError::CountSectionUnsupported(Encoding::Ascii))
    }

    fn close_file(&mut self) -> Result<(), WriterError> {
        let was_open = self.state == WriterState::Open;
        self.state = WriterState::Closed;
        if let Some(mut sink) = self.sink.take() {
            if was_open && self.endsolid {
                writeln!(sink, "endsolid ascii").map_err(|e| WriterError::io(&self.path, e))?;
            }
            sink.flush().map_err(|e| WriterError::io(&self.path, e))?;
        }
        Ok(())
    }

    fn triangles_written(&self) -> u32 {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::fs;
    use tempfile::TempDir;

    fn sample_triangle() -> Triangle {
        Triangle::from_vertices([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.5, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ])
    }

    #[test]
    fn test_facet_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one.stl");

        let mut writer = AsciiTriangleWriter::new(&path);
        writer.create_file().unwrap();
        writer.write_triangle(&sample_triangle()).unwrap();
        writer.close_file().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let expected = "solid ascii\n\
                        \x20 facet normal 0 0 1\n\
                        \x20   outer loop\n\
                        \x20vertex 0 0 0\n\
                        \x20vertex 1.5 0 0\n\
                        \x20vertex 0 2 0\n\
                        \x20  endloop\n\
                        \x20 endfacet\n";
        assert_eq!(text, expected);
        assert!(!text.contains("endsolid"));
    }

    #[test]
    fn test_endsolid_when_requested() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("closed.stl");

        let mut writer = AsciiTriangleWriter::new(&path).with_endsolid(true);
        writer.create_file().unwrap();
        writer.write_triangle(&sample_triangle()).unwrap();
        writer.close_file().unwrap();
        writer.close_file().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("  endfacet\nendsolid ascii\n"));
        assert_eq!(text.matches("endsolid").count(), 1);
    }

    #[test]
    fn test_triangle_count_is_a_contract_violation() {
        let dir = TempDir::new().unwrap();
        let mut writer = AsciiTriangleWriter::new(dir.path().join("count.stl"));
        writer.create_file().unwrap();

        assert!(matches!(
            writer.write_triangle_count(1),
            Err(WriterError::CountSectionUnsupported(Encoding::Ascii))
        ));
        assert!(!writer.supports_color());
    }
}
