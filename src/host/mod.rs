// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Host model module
//!
//! The read-only query surface the extractor needs from a host document
//! model, and an in-memory implementation loaded from scene files

mod memory;

pub use memory::{Element, Material, MemoryDocument, MemoryModel, ProjectLocation, View};

use crate::error::GeometryFault;
use crate::geometry::{Color, LengthUnit};
use crate::scene::{DefinitionId, GeometryNode, MaterialId};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Index of an open document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub usize);

/// Element identifier, unique within its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

/// Index of a view within its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub usize);

/// Category identifier; built-in categories share ids across documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

/// Element category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId(id),
            name: name.into(),
        }
    }
}

/// Point expressed in shared (project) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectPosition {
    pub east_west: f64,
    pub north_south: f64,
    pub elevation: f64,
}

impl ProjectPosition {
    pub fn to_point(&self) -> Point3<f64> {
        Point3::new(self.east_west, self.north_south, self.elevation)
    }
}

/// Read-only queries against a host document model.
///
/// Implementations never mutate model state on behalf of the extractor.
pub trait HostModel {
    /// Every document currently open, in host order
    fn open_documents(&self) -> Vec<DocumentId>;

    fn active_document(&self) -> DocumentId;

    /// Name of the view active in the host UI, if any
    fn active_view_name(&self) -> Option<&str>;

    fn document_title(&self, doc: DocumentId) -> &str;

    /// Find a view by exact name
    fn find_view(&self, doc: DocumentId, name: &str) -> Option<ViewId>;

    /// Non-type elements of a document, restricted to those visible in `view`
    /// when one is given
    fn elements(&self, doc: DocumentId, view: Option<ViewId>) -> Vec<ElementId>;

    fn element_category(&self, doc: DocumentId, element: ElementId) -> Option<&Category>;

    /// Root geometry of an element
    fn element_geometry(&self, doc: DocumentId, element: ElementId) -> Option<&GeometryNode>;

    /// Shared symbol geometry referenced by instances
    fn definition(&self, doc: DocumentId, id: DefinitionId) -> Option<&GeometryNode>;

    /// All categories configured in a document
    fn document_categories(&self, doc: DocumentId) -> Vec<&Category>;

    /// Names of the linked models referenced from a document
    fn link_references(&self, doc: DocumentId) -> Vec<&str>;

    fn material_color(&self, doc: DocumentId, material: MaterialId) -> Option<Color>;

    /// Re-project a point from internal to shared coordinates
    fn project_position(
        &self,
        doc: DocumentId,
        point: &Point3<f64>,
    ) -> Result<ProjectPosition, GeometryFault>;

    /// Convert a length from internal units
    fn convert_from_internal(&self, value: f64, unit: LengthUnit) -> f64 {
        unit.from_internal(value)
    }
}
