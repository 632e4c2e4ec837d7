// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export runner shared by the CLI commands

use crate::config::ExportConfig;
use crate::extract::{CancelToken, ExportOutcome, MeshExtractor};
use crate::io;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Exit code for a failed export
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for a cancelled export
pub const EXIT_CANCELLED: i32 = 2;

/// Runs scene exports and discards invalid output
#[derive(Default)]
pub struct Runner {
    cancel: CancelToken,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    /// Load `scene`, export it to `output` and remove the file unless the
    /// export succeeded. A target the writer refused to open is kept.
    pub fn run_export(
        &self,
        scene: &Path,
        output: &Path,
        config: &ExportConfig,
    ) -> Result<ExportOutcome> {
        let model = io::import_scene_file(scene)?;
        let settings = config
            .to_settings(&model)
            .context("Failed to resolve export settings")?;

        let outcome = MeshExtractor::new(&model)
            .with_cancel(self.cancel.clone())
            .export(&settings, output);

        let refused = matches!(&outcome, ExportOutcome::Failure(e) if e.left_output_untouched());
        if !outcome.is_success() && !refused && output.exists() {
            if let Err(e) = fs::remove_file(output) {
                warn!(path = %output.display(), error = %e, "Failed to remove invalid output");
            }
        }

        Ok(outcome)
    }
}

/// Process exit code for an export outcome
pub fn exit_code(outcome: &ExportOutcome) -> i32 {
    match outcome {
        ExportOutcome::Success(_) => 0,
        ExportOutcome::Failure(_) => EXIT_FAILURE,
        ExportOutcome::Cancelled => EXIT_CANCELLED,
    }
}
