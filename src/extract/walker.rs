// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene graph walker - flattens instances down to leaf solids

use crate::host::{DocumentId, HostModel};
use crate::scene::{GeometryNode, Solid, Transform};
use tracing::debug;

/// Receives every solid reached by a walk, with its accumulated transform
pub trait SolidVisitor {
    type Error;

    fn visit_solid(&mut self, solid: &Solid, transform: &Transform) -> Result<(), Self::Error>;
}

/// Depth-first walker over the geometry of one document.
///
/// Shared definitions are looked up through the host. Cyclic definitions
/// are not detected.
pub struct SceneWalker<'a, H: HostModel + ?Sized> {
    host: &'a H,
    doc: DocumentId,
}

impl<'a, H: HostModel + ?Sized> SceneWalker<'a, H> {
    pub fn new(host: &'a H, doc: DocumentId) -> Self {
        Self { host, doc }
    }

    pub fn walk<V: SolidVisitor>(
        &self,
        node: &GeometryNode,
        transform: &Transform,
        visitor: &mut V,
    ) -> Result<(), V::Error> {
        match node {
            GeometryNode::Solid(solid) => visitor.visit_solid(solid, transform),

            GeometryNode::Instance(instance) => {
                let definition = instance
                    .definition
                    .and_then(|id| self.host.definition(self.doc, id));

                match definition {
                    Some(node) => {
                        let composed = transform.compose(&instance.transform);
                        self.walk(node, &composed, visitor)
                    }
                    None => {
                        debug!(definition = ?instance.definition, "Skipping instance without definition");
                        Ok(())
                    }
                }
            }

            GeometryNode::Composite(children) => {
                for child in children {
                    self.walk(child, transform, visitor)?;
                }
                Ok(())
            }
        }
    }
}
