// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene graph node definitions

use super::Transform;
use crate::geometry::{triangulate_planar_polygon, FaceMesh};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Handle into a document's arena of shared geometry definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionId(pub usize);

/// Handle to a material in the owning document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u32);

/// A node of the geometry tree attached to an element
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryNode {
    Solid(Solid),
    Instance(Instance),
    Composite(Vec<GeometryNode>),
}

impl GeometryNode {
    /// Get child nodes held directly by this node
    pub fn children(&self) -> &[GeometryNode] {
        match self {
            GeometryNode::Composite(children) => children,
            _ => &[],
        }
    }
}

/// Leaf body made of faces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Solid {
    pub faces: Vec<Face>,
}

impl Solid {
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Positioned reference to a shared definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Shared symbol geometry, `None` when the host could not supply it
    pub definition: Option<DefinitionId>,
    #[serde(default)]
    pub transform: Transform,
}

impl Instance {
    pub fn new(definition: DefinitionId, transform: Transform) -> Self {
        Self {
            definition: Some(definition),
            transform,
        }
    }
}

/// Bounded surface patch of a solid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub material: Option<MaterialId>,
    pub surface: FaceSurface,
}

fn default_visible() -> bool {
    true
}

impl Face {
    pub fn new(surface: FaceSurface) -> Self {
        Self {
            visible: true,
            material: None,
            surface,
        }
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Produce the face's triangle mesh; computed on every call
    pub fn triangulate(&self) -> Option<FaceMesh> {
        match &self.surface {
            FaceSurface::Mesh {
                vertices,
                triangles,
            } => {
                if triangles.is_empty() {
                    return None;
                }
                Some(FaceMesh::new(vertices.clone(), triangles.clone()))
            }
            FaceSurface::Polygon { outline, holes } => triangulate_planar_polygon(outline, holes),
        }
    }
}

/// Surface description a face is triangulated from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceSurface {
    /// Pre-tessellated patch
    Mesh {
        vertices: Vec<Point3<f64>>,
        triangles: Vec<[usize; 3]>,
    },
    /// Planar polygon with optional inner loops
    Polygon {
        outline: Vec<Point3<f64>>,
        #[serde(default)]
        holes: Vec<Vec<Point3<f64>>>,
    },
}
