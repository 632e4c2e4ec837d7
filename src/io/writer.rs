// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Common contract of the STL triangle writers

use crate::error::WriterError;
use crate::geometry::Triangle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::Path;
use std::str::FromStr;

/// STL output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Binary,
    Ascii,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Binary => f.write_str("binary"),
            Encoding::Ascii => f.write_str("ascii"),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "binary" | "bin" => Ok(Encoding::Binary),
            "ascii" | "text" => Ok(Encoding::Ascii),
            _ => Err(format!("Unknown STL encoding: {}", s)),
        }
    }
}

/// Lifecycle of a writer: `Unopened -> Open -> Closed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    Unopened,
    Open,
    Closed,
}

/// Streaming sink for triangles in one STL encoding
pub trait TriangleWriter {
    fn encoding(&self) -> Encoding;

    fn state(&self) -> WriterState;

    /// Whether per-triangle color reaches the output
    fn supports_color(&self) -> bool {
        false
    }

    /// Open the output and write the leading header
    fn create_file(&mut self) -> Result<(), WriterError>;

    /// Append one triangle; only valid while open
    fn write_triangle(&mut self, triangle: &Triangle) -> Result<(), WriterError>;

    /// Patch the final triangle count into the header.
    ///
    /// Only the binary encoding has a count section; for every other
    /// encoding calling this is a caller bug and returns
    /// `WriterError::CountSectionUnsupported`.
    fn write_triangle_count(&mut self, count: u32) -> Result<(), WriterError> {
        let _ = count;
        Err(WriterError::CountSectionUnsupported(self.encoding()))
    }

    /// Flush and release the output. Calling it again is a no-op.
    fn close_file(&mut self) -> Result<(), WriterError>;

    /// Number of triangle records appended so far
    fn triangles_written(&self) -> u32;
}

/// Create (or replace) the output file, refusing read-only targets
pub(crate) fn open_output(path: &Path) -> Result<File, WriterError> {
    if let Ok(metadata) = fs::metadata(path) {
        if metadata.permissions().readonly() {
            return Err(WriterError::ReadOnly(path.to_path_buf()));
        }
        fs::remove_file(path).map_err(|e| WriterError::io(path, e))?;
    }
    File::create(path).map_err(|e| WriterError::io(path, e))
}
