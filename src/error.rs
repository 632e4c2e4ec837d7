// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types shared by the extraction pipeline

use crate::io::Encoding;
use std::path::PathBuf;
use thiserror::Error;

/// Faults raised by the STL writers
#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Output file is read-only: {0}")]
    ReadOnly(PathBuf),

    #[error("Permission denied for output file: {0}")]
    PermissionDenied(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Writer is not open")]
    NotOpen,

    #[error("Writer was already opened")]
    AlreadyOpened,

    #[error("Declared triangle count {declared} does not match {written} records written")]
    CountMismatch { declared: u32, written: u32 },

    #[error("{0} encoding has no triangle count section")]
    CountSectionUnsupported(Encoding),
}

impl WriterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            return WriterError::PermissionDenied(path.into());
        }
        WriterError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Numerical or geometric fault on a single triangle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryFault {
    #[error("Vertex index {index} out of range ({len} vertices)")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("Triangle index {index} out of range ({len} triangles)")]
    TriangleOutOfRange { index: usize, len: usize },

    #[error("Non-finite coordinate after {stage}")]
    NonFinite { stage: &'static str },

    #[error("Project position unavailable: {0}")]
    ProjectPosition(String),
}

/// Reasons an export did not produce a valid file
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot write output: {0}")]
    CannotWrite(#[from] WriterError),

    #[error("No exportable solids")]
    NoExportableSolids,
}

impl ExportError {
    /// True when the failure is "nothing to export" rather than "could not export"
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ExportError::NoExportableSolids)
    }

    /// True when the output was refused before anything was written, so a
    /// file at the target path still belongs to the caller
    pub fn left_output_untouched(&self) -> bool {
        matches!(
            self,
            ExportError::CannotWrite(WriterError::ReadOnly(_) | WriterError::PermissionDenied(_))
        )
    }
}

/// Errors raised while building a scene description
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Active document index {index} out of range ({len} documents)")]
    ActiveDocumentOutOfRange { index: usize, len: usize },

    #[error("Document '{document}' references unknown category {category}")]
    UnknownCategory { document: String, category: u32 },

    #[error("Duplicate element id {element} in document '{document}'")]
    DuplicateElement { document: String, element: u64 },
}
