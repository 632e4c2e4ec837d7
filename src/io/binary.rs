// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Binary STL writer
//!
//! Layout: an 80-byte header, a little-endian `u32` triangle count at byte
//! 80, then one 50-byte record per triangle (normal, three vertices, `u16`
//! attribute). The count is written as zero on creation and patched once
//! every triangle has been appended.

use super::writer::{open_output, Encoding, TriangleWriter, WriterState};
use crate::error::WriterError;
use crate::geometry::Triangle;
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub const HEADER_LEN: usize = 80;
pub const COUNT_OFFSET: u64 = HEADER_LEN as u64;
pub const RECORD_LEN: usize = 50;
pub const DEFAULT_HEADER_LABEL: &str = "name";

/// Writes triangles in the binary STL encoding with optional RGB555 color
pub struct BinaryTriangleWriter {
    path: PathBuf,
    header: [u8; HEADER_LEN],
    sink: Option<BufWriter<File>>,
    state: WriterState,
    written: u32,
}

impl BinaryTriangleWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_header(path, DEFAULT_HEADER_LABEL)
    }

    /// Use `label` as the header text, truncated to 80 bytes and zero padded
    pub fn with_header(path: impl AsRef<Path>, label: &str) -> Self {
        let mut header = [0u8; HEADER_LEN];
        let bytes = label.as_bytes();
        let len = bytes.len().min(HEADER_LEN);
        header[..len].copy_from_slice(&bytes[..len]);

        Self {
            path: path.as_ref().to_path_buf(),
            header,
            sink: None,
            state: WriterState::Unopened,
            written: 0,
        }
    }

    fn sink(&mut self) -> Result<&mut BufWriter<File>, WriterError> {
        match self.state {
            WriterState::Open => self.sink.as_mut().ok_or(WriterError::NotOpen),
            _ => Err(WriterError::NotOpen),
        }
    }

    fn write_record(sink: &mut BufWriter<File>, triangle: &Triangle) -> std::io::Result<()> {
        for c in triangle.normal.iter() {
            sink.write_f32::<LittleEndian>(*c as f32)?;
        }
        for vertex in &triangle.vertices {
            for c in vertex.coords.iter() {
                sink.write_f32::<LittleEndian>(*c as f32)?;
            }
        }
        let attribute = triangle.color.map(|c| c.to_rgb555()).unwrap_or(0);
        sink.write_u16::<LittleEndian>(attribute)
    }
}

impl TriangleWriter for BinaryTriangleWriter {
    fn encoding(&self) -> Encoding {
        Encoding::Binary
    }

    fn state(&self) -> WriterState {
        self.state
    }

    fn supports_color(&self) -> bool {
        true
    }

    fn create_file(&mut self) -> Result<(), WriterError> {
        if self.state != WriterState::Unopened {
            return Err(WriterError::AlreadyOpened);
        }

        let file = open_output(&self.path)?;
        let mut sink = BufWriter::new(file);
        sink.write_all(&self.header)
            .and_then(|_| sink.write_u32::<LittleEndian>(0))
            .map_err(|e| WriterError::io(&self.path, e))?;

        self.sink = Some(sink);
        self.state = WriterState::Open;
        Ok(())
    }

    fn write_triangle(&mut self, triangle: &Triangle) -> Result<(), WriterError> {
        let path = self.path.clone();
        let sink = self.sink()?;
        Self::write_record(sink, triangle).map_err(|e| WriterError::io(path, e))?;
        self.written += 1;
        Ok(())
    }

    fn write_triangle_count(&mut self, count: u32) -> Result<(), WriterError> {
        let written = self.written;
        let path = self.path.clone();
        let sink = self.sink()?;
        if count != written {
            return Err(WriterError::CountMismatch {
                declared: count,
                written,
            });
        }

        sink.seek(SeekFrom::Start(COUNT_OFFSET))
            .and_then(|_| sink.write_u32::<LittleEndian>(count))
            .and_then(|_| sink.seek(SeekFrom::End(0)))
            .map(|_| ())
            .map_err(|e| WriterError::io(path, e))
    }

    fn close_file(&mut self) -> Result<(), WriterError> {
        self.state = WriterState::Closed;
        if let Some(mut sink) = self.sink.take() {
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
    use crate::geometry::Color;
    use nalgebra::Point3;
    use std::fs;
    use tempfile::TempDir;

    fn unit_triangle() -> Triangle {
        Triangle::from_vertices([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
    }

    fn read_f32(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_single_triangle_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one.stl");

        let mut writer = BinaryTriangleWriter::new(&path);
        writer.create_file().unwrap();
        writer.write_triangle(&unit_triangle()).unwrap();
        writer.write_triangle_count(1).unwrap();
        writer.close_file().unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 4 + RECORD_LEN);
        assert_eq!(&bytes[..4], b"name");
        assert!(bytes[4..HEADER_LEN].iter().all(|&b| b == 0));
        assert_eq!(u32::from_le_bytes(bytes[80..84].try_into().unwrap()), 1);

        let expected = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        for (i, value) in expected.iter().enumerate() {
            assert_eq!(read_f32(&bytes, 84 + i * 4), *value);
        }
        assert_eq!(&bytes[132..134], &[0, 0]);
    }

    #[test]
    fn test_count_left_zero_until_patched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.stl");

        let mut writer = BinaryTriangleWriter::new(&path);
        writer.create_file().unwrap();
        writer.write_triangle(&unit_triangle()).unwrap();
        writer.write_triangle(&unit_triangle()).unwrap();
        writer.close_file().unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 84 + 2 * RECORD_LEN);
        assert_eq!(&bytes[80..84], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_color_attribute_is_rgb555() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("red.stl");

        let mut writer = BinaryTriangleWriter::new(&path);
        writer.create_file().unwrap();
        writer
            .write_triangle(&unit_triangle().with_color(Some(Color::new(255, 0, 0))))
            .unwrap();
        writer.write_triangle_count(1).unwrap();
        writer.close_file().unwrap();

        let bytes = fs::read(&path).unwrap();
        let attribute = u16::from_le_bytes([bytes[132], bytes[133]]);
        assert_eq!(attribute & 0x1F, 31);
        assert_eq!((attribute >> 5) & 0x1F, 0);
        assert_eq!((attribute >> 10) & 0x1F, 0);
        assert_eq!(attribute & 0x8000, 0);
    }

    #[test]
    fn test_count_mismatch_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut writer = BinaryTriangleWriter::new(dir.path().join("bad.stl"));
        writer.create_file().unwrap();
        writer.write_triangle(&unit_triangle()).unwrap();

        assert!(matches!(
            writer.write_triangle_count(2),
            Err(WriterError::CountMismatch { declared: 2, written: 1 })
        ));
    }

    #[test]
    fn test_state_machine() {
        let dir = TempDir::new().unwrap();
        let mut writer = BinaryTriangleWriter::new(dir.path().join("state.stl"));

        assert_eq!(writer.state(), WriterState::Unopened);
        assert!(matches!(
            writer.write_triangle(&unit_triangle()),
            Err(WriterError::NotOpen)
        ));

        writer.create_file().unwrap();
        assert_eq!(writer.state(), WriterState::Open);
        assert!(matches!(writer.create_file(), Err(WriterError::AlreadyOpened)));

        writer.close_file().unwrap();
        writer.close_file().unwrap();
        assert_eq!(writer.state(), WriterState::Closed);
        assert!(matches!(
            writer.write_triangle(&unit_triangle()),
            Err(WriterError::NotOpen)
        ));
    }

    #[test]
    fn test_long_header_is_truncated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("long.stl");
        let label = "x".repeat(120);

        let mut writer = BinaryTriangleWriter::with_header(&path, &label);
        writer.create_file().unwrap();
        writer.close_file().unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 84);
        assert!(bytes[..80].iter().all(|&b| b == b'x'));
    }
}
