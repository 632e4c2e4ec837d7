// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Extraction module - scene walking, face processing and export orchestration

mod cancel;
mod extractor;
mod faces;
mod settings;
mod walker;

pub use cancel::CancelToken;
pub use extractor::{ExportOutcome, ExportReport, MeshExtractor};
pub use faces::{FaceProcessor, RunningCount};
pub use settings::{ExportScope, ExportSettings};
pub use walker::{SceneWalker, SolidVisitor};
