// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh extractor - drives the walk across documents and owns the outcome

use super::cancel::CancelToken;
use super::faces::{FaceProcessor, RunningCount};
use super::settings::{ExportScope, ExportSettings};
use super::walker::SceneWalker;
use crate::error::{ExportError, WriterError};
use crate::host::{Category, DocumentId, HostModel, ViewId};
use crate::io::{Encoding, TriangleWriter};
use crate::scene::Transform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Statistics of a finished export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportReport {
    pub encoding: Encoding,
    pub triangles_written: u32,
    pub triangles_dropped: u32,
    pub documents: usize,
    pub elements: usize,
    pub duration: Duration,
}

/// Result of an export
#[derive(Debug)]
pub enum ExportOutcome {
    Success(ExportReport),
    Failure(ExportError),
    /// Stopped on request; the output is not valid
    Cancelled,
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Success(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExportOutcome::Cancelled)
    }

    pub fn report(&self) -> Option<&ExportReport> {
        match self {
            ExportOutcome::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ExportError> {
        match self {
            ExportOutcome::Failure(error) => Some(error),
            _ => None,
        }
    }
}

enum Pass {
    Completed,
    Cancelled,
}

/// Extracts the geometry of a host model into STL
pub struct MeshExtractor<'h, H: HostModel + ?Sized> {
    host: &'h H,
    cancel: CancelToken,
}

impl<'h, H: HostModel + ?Sized> MeshExtractor<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self {
            host,
            cancel: CancelToken::new(),
        }
    }

    /// Poll `token` between documents, between elements and once more after
    /// the last element
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Export to `output` with the writer matching `settings.encoding`
    pub fn export(&self, settings: &ExportSettings, output: impl AsRef<Path>) -> ExportOutcome {
        let output = output.as_ref();
        info!(path = %output.display(), encoding = %settings.encoding, "Starting STL export");
        let mut writer = settings.create_writer(output);
        self.export_with_writer(settings, writer.as_mut())
    }

    /// Export through a caller-supplied writer that has not been opened yet
    pub fn export_with_writer(
        &self,
        settings: &ExportSettings,
        writer: &mut dyn TriangleWriter,
    ) -> ExportOutcome {
        let start = Instant::now();

        if let Err(e) = writer.create_file() {
            return ExportOutcome::Failure(e.into());
        }

        let mut count = RunningCount::new();
        let mut report = ExportReport {
            encoding: writer.encoding(),
            ..ExportReport::default()
        };

        let pass = match self.run_pass(settings, writer, &mut count, &mut report) {
            Ok(Pass::Completed) if self.cancel.is_cancelled() => Pass::Cancelled,
            Ok(pass) => pass,
            Err(e) => return Self::abandon(writer, e.into()),
        };

        match pass {
            Pass::Completed => {}
            Pass::Cancelled => {
                info!(triangles = writer.triangles_written(), "Export cancelled");
                if let Err(e) = writer.close_file() {
                    warn!(error = %e, "Failed to close cancelled output");
                }
                return ExportOutcome::Cancelled;
            }
        }

        report.triangles_written = count.value();
        report.triangles_dropped = count.dropped();

        if count.value() == 0 {
            return Self::abandon(writer, ExportError::NoExportableSolids);
        }

        if writer.encoding() == Encoding::Binary {
            if let Err(e) = writer.write_triangle_count(count.value()) {
                return Self::abandon(writer, e.into());
            }
        }

        if let Err(e) = writer.close_file() {
            return ExportOutcome::Failure(e.into());
        }

        report.duration = start.elapsed();
        info!(
            triangles = report.triangles_written,
            dropped = report.triangles_dropped,
            documents = report.documents,
            elements = report.elements,
            "Export finished"
        );
        ExportOutcome::Success(report)
    }

    fn abandon(writer: &mut dyn TriangleWriter, error: ExportError) -> ExportOutcome {
        if let Err(e) = writer.close_file() {
            warn!(error = %e, "Failed to close output after error");
        }
        ExportOutcome::Failure(error)
    }

    fn run_pass(
        &self,
        settings: &ExportSettings,
        writer: &mut dyn TriangleWriter,
        count: &mut RunningCount,
        report: &mut ExportReport,
    ) -> Result<Pass, WriterError> {
        let resolver = settings.resolver();

        for doc in self.source_documents(settings.include_linked) {
            if self.cancel.is_cancelled() {
                return Ok(Pass::Cancelled);
            }

            let view = match settings.scope {
                ExportScope::All => None,
                ExportScope::OnlyVisibleInActiveView => self.active_view_in(doc),
            };
            let walker = SceneWalker::new(self.host, doc);
            let elements = self.host.elements(doc, view);
            info!(
                document = self.host.document_title(doc),
                elements = elements.len(),
                "Exporting document"
            );
            report.documents += 1;

            for element in elements {
                if self.cancel.is_cancelled() {
                    return Ok(Pass::Cancelled);
                }

                if !settings.accepts(self.host.element_category(doc, element)) {
                    continue;
                }
                let geometry = match self.host.element_geometry(doc, element) {
                    Some(geometry) => geometry,
                    None => continue,
                };
                report.elements += 1;

                let mut processor = FaceProcessor::new(self.host, doc, resolver, writer, count)
                    .with_color(settings.include_color);
                walker.walk(geometry, &Transform::identity(), &mut processor)?;
            }
        }

        Ok(Pass::Completed)
    }

    /// View with the active view's name in `doc`; `None` falls back to every element
    fn active_view_in(&self, doc: DocumentId) -> Option<ViewId> {
        let name = self.host.active_view_name()?;
        let view = self.host.find_view(doc, name);
        if view.is_none() {
            debug!(
                document = self.host.document_title(doc),
                view = name,
                "View not found, exporting every element"
            );
        }
        view
    }

    /// The active document followed by the open linked documents it references
    pub fn source_documents(&self, include_linked: bool) -> Vec<DocumentId> {
        let active = self.host.active_document();
        let mut documents = vec![active];
        if include_linked {
            documents.extend(self.linked_documents(active));
        }
        documents
    }

    fn linked_documents(&self, active: DocumentId) -> Vec<DocumentId> {
        let mut linked = Vec::new();

        for reference in self.host.link_references(active) {
            let wanted = title_stem(reference);
            let found = self
                .host
                .open_documents()
                .into_iter()
                .filter(|doc| *doc != active)
                .find(|doc| title_stem(self.host.document_title(*doc)) == wanted);

            match found {
                Some(doc) if !linked.contains(&doc) => linked.push(doc),
                Some(_) => {}
                None => warn!(link = reference, "Linked model is not open, skipping"),
            }
        }

        linked
    }

    /// Categories by name, first name wins.
    ///
    /// Without `include_all_documents` only categories used by elements of
    /// the active document are listed; with it, every category configured
    /// in the active and linked documents.
    pub fn list_categories(&self, include_all_documents: bool) -> BTreeMap<String, Category> {
        let mut categories = BTreeMap::new();

        if include_all_documents {
            for doc in self.source_documents(true) {
                for category in self.host.document_categories(doc) {
                    categories
                        .entry(category.name.clone())
                        .or_insert_with(|| category.clone());
                }
            }
        } else {
            let doc = self.host.active_document();
            for element in self.host.elements(doc, None) {
                if let Some(category) = self.host.element_category(doc, element) {
                    categories
                        .entry(category.name.clone())
                        .or_insert_with(|| category.clone());
                }
            }
        }

        categories
    }
}

/// Lowercased file stem used to match link names against document titles
fn title_stem(title: &str) -> String {
    Path::new(title)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| title.to_lowercase())
}
