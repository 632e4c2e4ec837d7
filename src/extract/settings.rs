// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export settings snapshot

use crate::geometry::{CoordinateResolver, CoordinateSpace, LengthUnit};
use crate::host::{Category, CategoryId};
use crate::io::{AsciiTriangleWriter, BinaryTriangleWriter, Encoding, TriangleWriter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which elements of a document are exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
    #[default]
    All,
    /// Only elements visible in the view carrying the active view's name
    OnlyVisibleInActiveView,
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportScope::All => f.write_str("all"),
            ExportScope::OnlyVisibleInActiveView => f.write_str("visible"),
        }
    }
}

impl FromStr for ExportScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ExportScope::All),
            "visible" | "view" | "only_visible_in_active_view" => {
                Ok(ExportScope::OnlyVisibleInActiveView)
            }
            _ => Err(format!("Unknown export scope: {}", s)),
        }
    }
}

/// Immutable options for one export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub encoding: Encoding,
    pub scope: ExportScope,
    pub include_linked: bool,
    /// Only honored by encodings that can carry color
    pub include_color: bool,
    pub shared_coordinates: bool,
    /// Empty means every category, including elements without one
    pub categories: BTreeSet<CategoryId>,
    /// `None` keeps internal units
    pub unit: Option<LengthUnit>,
    /// Binary header text
    pub header_label: String,
    /// Terminate ASCII output with `endsolid`
    pub ascii_endsolid: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            encoding: Encoding::Binary,
            scope: ExportScope::All,
            include_linked: false,
            include_color: false,
            shared_coordinates: false,
            categories: BTreeSet::new(),
            unit: None,
            header_label: crate::io::DEFAULT_HEADER_LABEL.to_string(),
            ascii_endsolid: false,
        }
    }
}

impl ExportSettings {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: ExportScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_linked(mut self, include_linked: bool) -> Self {
        self.include_linked = include_linked;
        self
    }

    pub fn with_color(mut self, include_color: bool) -> Self {
        self.include_color = include_color;
        self
    }

    pub fn with_shared_coordinates(mut self, shared: bool) -> Self {
        self.shared_coordinates = shared;
        self
    }

    pub fn with_unit(mut self, unit: Option<LengthUnit>) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = CategoryId>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    /// Coordinate pipeline matching these settings
    pub fn resolver(&self) -> CoordinateResolver {
        let space = if self.shared_coordinates {
            CoordinateSpace::Shared
        } else {
            CoordinateSpace::Internal
        };
        CoordinateResolver::new(space, self.unit)
    }

    /// Category filter: an empty selection accepts everything
    pub fn accepts(&self, category: Option<&Category>) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        category.is_some_and(|c| self.categories.contains(&c.id))
    }

    /// Writer for the configured encoding
    pub fn create_writer(&self, path: impl AsRef<Path>) -> Box<dyn TriangleWriter> {
        match self.encoding {
            Encoding::Binary => Box::new(BinaryTriangleWriter::with_header(path, &self.header_label)),
            Encoding::Ascii => {
                Box::new(AsciiTriangleWriter::new(path).with_endsolid(self.ascii_endsolid))
            }
        }
    }
}
