// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! In-memory host model

use super::{Category, CategoryId, DocumentId, ElementId, HostModel, ProjectPosition, ViewId};
use crate::error::{GeometryFault, SceneError};
use crate::geometry::Color;
use crate::scene::{DefinitionId, GeometryNode, MaterialId};
use crate::utils::math::is_finite_point;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A set of open documents, one of them active
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryModel {
    #[serde(default)]
    pub active_document: usize,
    #[serde(default)]
    pub active_view: Option<String>,
    pub documents: Vec<MemoryDocument>,
}

/// One open document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryDocument {
    pub title: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub views: Vec<View>,
    /// Linked model names, e.g. `Structure.rvt`
    #[serde(default)]
    pub links: Vec<String>,
    /// Arena of shared definitions addressed by `DefinitionId`
    #[serde(default)]
    pub definitions: Vec<GeometryNode>,
    #[serde(default)]
    pub project_location: ProjectLocation,
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    #[serde(default)]
    pub name: String,
    pub color: Color,
}

/// Named view; elements listed in `hidden` are not visible in it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct View {
    pub name: String,
    #[serde(default)]
    pub hidden: Vec<ElementId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<CategoryId>,
    /// Type elements carry no instance geometry and are never exported
    #[serde(default)]
    pub is_type: bool,
    #[serde(default)]
    pub geometry: Option<GeometryNode>,
}

impl Element {
    pub fn new(id: u64, category: Option<CategoryId>, geometry: GeometryNode) -> Self {
        Self {
            id: ElementId(id),
            name: String::new(),
            category,
            is_type: false,
            geometry: Some(geometry),
        }
    }
}

/// Placement of the project in shared coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectLocation {
    #[serde(default)]
    pub east_west: f64,
    #[serde(default)]
    pub north_south: f64,
    #[serde(default)]
    pub elevation: f64,
    /// Angle from project north to true north, in degrees
    #[serde(default)]
    pub angle: f64,
}

impl ProjectLocation {
    pub fn position_of(&self, point: &Point3<f64>) -> ProjectPosition {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        ProjectPosition {
            east_west: point.x * cos - point.y * sin + self.east_west,
            north_south: point.x * sin + point.y * cos + self.north_south,
            elevation: point.z + self.elevation,
        }
    }
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and return its id; the first one added is active
    pub fn add_document(&mut self, document: MemoryDocument) -> DocumentId {
        self.documents.push(document);
        DocumentId(self.documents.len() - 1)
    }

    pub fn with_active_view(mut self, name: impl Into<String>) -> Self {
        self.active_view = Some(name.into());
        self
    }

    /// Document behind `doc`, `None` for an id this model never handed out
    pub fn document(&self, doc: DocumentId) -> Option<&MemoryDocument> {
        self.documents.get(doc.0)
    }

    pub fn document_mut(&mut self, doc: DocumentId) -> Option<&mut MemoryDocument> {
        self.documents.get_mut(doc.0)
    }

    /// Check cross references inside the model
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.active_document >= self.documents.len() {
            return Err(SceneError::ActiveDocumentOutOfRange {
                index: self.active_document,
                len: self.documents.len(),
            });
        }

        for document in &self.documents {
            let mut seen = HashSet::new();
            for element in &document.elements {
                if !seen.insert(element.id) {
                    return Err(SceneError::DuplicateElement {
                        document: document.title.clone(),
                        element: element.id.0,
                    });
                }
                if let Some(category) = element.category {
                    if document.category(category).is_none() {
                        return Err(SceneError::UnknownCategory {
                            document: document.title.clone(),
                            category: category.0,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl MemoryDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn add_category(&mut self, category: Category) -> CategoryId {
        let id = category.id;
        if self.category(id).is_none() {
            self.categories.push(category);
        }
        id
    }

    pub fn add_material(&mut self, id: u32, name: impl Into<String>, color: Color) -> MaterialId {
        let id = MaterialId(id);
        self.materials.push(Material {
            id,
            name: name.into(),
            color,
        });
        id
    }

    pub fn add_definition(&mut self, node: GeometryNode) -> DefinitionId {
        self.definitions.push(node);
        DefinitionId(self.definitions.len() - 1)
    }

    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    pub fn add_view(&mut self, view: View) -> ViewId {
        self.views.push(view);
        ViewId(self.views.len() - 1)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }
}

impl HostModel for MemoryModel {
    fn open_documents(&self) -> Vec<DocumentId> {
        (0..self.documents.len()).map(DocumentId).collect()
    }

    fn active_document(&self) -> DocumentId {
        DocumentId(self.active_document)
    }

    fn active_view_name(&self) -> Option<&str> {
        self.active_view.as_deref()
    }

    fn document_title(&self, doc: DocumentId) -> &str {
        self.document(doc).map_or("", |d| d.title.as_str())
    }

    fn find_view(&self, doc: DocumentId, name: &str) -> Option<ViewId> {
        self.document(doc)?
            .views
            .iter()
            .position(|v| v.name == name)
            .map(ViewId)
    }

    fn elements(&self, doc: DocumentId, view: Option<ViewId>) -> Vec<ElementId> {
        let Some(document) = self.document(doc) else {
            return Vec::new();
        };
        let hidden: HashSet<ElementId> = view
            .and_then(|v| document.views.get(v.0))
            .map(|v| v.hidden.iter().copied().collect())
            .unwrap_or_default();

        document
            .elements
            .iter()
            .filter(|e| !e.is_type && !hidden.contains(&e.id))
            .map(|e| e.id)
            .collect()
    }

    fn element_category(&self, doc: DocumentId, element: ElementId) -> Option<&Category> {
        let document = self.document(doc)?;
        document
            .element(element)
            .and_then(|e| e.category)
            .and_then(|id| document.category(id))
    }

    fn element_geometry(&self, doc: DocumentId, element: ElementId) -> Option<&GeometryNode> {
        self.document(doc)?
            .element(element)
            .and_then(|e| e.geometry.as_ref())
    }

    fn definition(&self, doc: DocumentId, id: DefinitionId) -> Option<&GeometryNode> {
        self.document(doc)?.definitions.get(id.0)
    }

    fn document_categories(&self, doc: DocumentId) -> Vec<&Category> {
        self.document(doc)
            .map(|d| d.categories.iter().collect())
            .unwrap_or_default()
    }

    fn link_references(&self, doc: DocumentId) -> Vec<&str> {
        self.document(doc)
            .map(|d| d.links.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn material_color(&self, doc: DocumentId, material: MaterialId) -> Option<Color> {
        self.document(doc)?
            .materials
            .iter()
            .find(|m| m.id == material)
            .map(|m| m.color)
    }

    fn project_position(
        &self,
        doc: DocumentId,
        point: &Point3<f64>,
    ) -> Result<ProjectPosition, GeometryFault> {
        if !is_finite_point(point) {
            return Err(GeometryFault::ProjectPosition(format!(
                "non-finite point {:?}",
                point
            )));
        }
        let document = self
            .document(doc)
            .ok_or_else(|| GeometryFault::ProjectPosition(format!("unknown document {}", doc.0)))?;
        Ok(document.project_location.position_of(point))
    }
}
