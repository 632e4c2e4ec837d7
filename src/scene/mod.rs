// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene graph module
//!
//! Solids, shared-definition instances and nested collections, plus the
//! affine transforms composed while walking them

mod node;
mod transform;

pub use node::{DefinitionId, Face, FaceSurface, GeometryNode, Instance, MaterialId, Solid};
pub use transform::{Transform, TransformOp, Vec3};
