// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Output coordinate resolution
//!
//! Takes a point that has already been through the accumulated instance
//! transform and maps it into the requested output space and unit.

use super::LengthUnit;
use crate::error::GeometryFault;
use crate::host::{DocumentId, HostModel};
use crate::utils::math::is_finite_point;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Coordinate system written to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// Raw model coordinates
    #[default]
    Internal,
    /// Shared project coordinates (east-west, north-south, elevation)
    Shared,
}

/// Maps transformed model points into output space and unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateResolver {
    pub space: CoordinateSpace,
    /// `None` leaves coordinates in internal units
    pub unit: Option<LengthUnit>,
}

impl CoordinateResolver {
    pub fn new(space: CoordinateSpace, unit: Option<LengthUnit>) -> Self {
        Self { space, unit }
    }

    /// Resolve one point: reproject first, then convert units
    pub fn resolve<H: HostModel + ?Sized>(
        &self,
        host: &H,
        doc: DocumentId,
        point: &Point3<f64>,
    ) -> Result<Point3<f64>, GeometryFault> {
        if !is_finite_point(point) {
            return Err(GeometryFault::NonFinite { stage: "transform" });
        }

        let located = match self.space {
            CoordinateSpace::Internal => *point,
            CoordinateSpace::Shared => host.project_position(doc, point)?.to_point(),
        };

        let converted = match self.unit {
            Some(unit) => located.map(|c| host.convert_from_internal(c, unit)),
            None => located,
        };

        if !is_finite_point(&converted) {
            return Err(GeometryFault::NonFinite {
                stage: "unit conversion",
            });
        }
        Ok(converted)
    }
}

impl Default for CoordinateResolver {
    fn default() -> Self {
        Self::new(CoordinateSpace::Internal, None)
    }
}
