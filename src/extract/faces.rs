// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face processing - visible faces to oriented output triangles

use super::walker::SolidVisitor;
use crate::error::{GeometryFault, WriterError};
use crate::geometry::{Color, CoordinateResolver, FaceMesh, Triangle};
use crate::host::{DocumentId, HostModel};
use crate::io::TriangleWriter;
use crate::scene::{Face, Solid, Transform};
use tracing::debug;

/// Triangle accumulator for one export.
///
/// Every face adds its mesh's triangle count up front; each triangle that
/// faults is taken back out, so the value always equals the records written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningCount {
    count: u32,
    dropped: u32,
}

impl RunningCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a face about to be emitted
    pub fn plan(&mut self, triangles: usize) {
        let triangles = u32::try_from(triangles).unwrap_or(u32::MAX);
        self.count = self.count.saturating_add(triangles);
    }

    /// Remove one planned triangle that could not be emitted
    pub fn reject(&mut self) {
        self.count = self.count.saturating_sub(1);
        self.dropped += 1;
    }

    pub fn value(&self) -> u32 {
        self.count
    }

    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

/// Turns the faces of each visited solid into triangles on a writer
pub struct FaceProcessor<'a, H: HostModel + ?Sized> {
    host: &'a H,
    doc: DocumentId,
    resolver: CoordinateResolver,
    include_color: bool,
    writer: &'a mut dyn TriangleWriter,
    count: &'a mut RunningCount,
}

impl<'a, H: HostModel + ?Sized> FaceProcessor<'a, H> {
    pub fn new(
        host: &'a H,
        doc: DocumentId,
        resolver: CoordinateResolver,
        writer: &'a mut dyn TriangleWriter,
        count: &'a mut RunningCount,
    ) -> Self {
        Self {
            host,
            doc,
            resolver,
            include_color: false,
            writer,
            count,
        }
    }

    /// Carry face material colors; ignored when the writer cannot store them
    pub fn with_color(mut self, include_color: bool) -> Self {
        self.include_color = include_color && self.writer.supports_color();
        self
    }

    fn face_color(&self, face: &Face) -> Option<Color> {
        if !self.include_color {
            return None;
        }
        face.material
            .and_then(|material| self.host.material_color(self.doc, material))
    }

    fn build_triangle(
        &self,
        mesh: &FaceMesh,
        index: usize,
        transform: &Transform,
    ) -> Result<Triangle, GeometryFault> {
        let corners = mesh.triangle_vertices(index)?;

        let mut resolved = corners;
        for (out, corner) in resolved.iter_mut().zip(corners.iter()) {
            let moved = transform.apply(corner);
            *out = self.resolver.resolve(self.host, self.doc, &moved)?;
        }

        Ok(Triangle::from_vertices(resolved))
    }

    fn process_face(&mut self, face: &Face, transform: &Transform) -> Result<(), WriterError> {
        let mesh = match face.triangulate() {
            Some(mesh) => mesh,
            None => return Ok(()),
        };
        let color = self.face_color(face);

        self.count.plan(mesh.triangle_count());
        for index in 0..mesh.triangle_count() {
            match self.build_triangle(&mesh, index, transform) {
                Ok(triangle) => self.writer.write_triangle(&triangle.with_color(color))?,
                Err(fault) => {
                    debug!(triangle = index, %fault, "Dropping triangle");
                    self.count.reject();
                }
            }
        }

        Ok(())
    }
}

impl<H: HostModel + ?Sized> SolidVisitor for FaceProcessor<'_, H> {
    type Error = WriterError;

    fn visit_solid(&mut self, solid: &Solid, transform: &Transform) -> Result<(), WriterError> {
        for face in solid.faces.iter().filter(|f| f.visible) {
            self.process_face(face, transform)?;
        }
        Ok(())
    }
}
