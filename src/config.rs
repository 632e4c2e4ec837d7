// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export configuration system

use crate::extract::{ExportScope, ExportSettings, MeshExtractor};
use crate::geometry::LengthUnit;
use crate::host::HostModel;
use crate::io::{Encoding, DEFAULT_HEADER_LABEL};
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File picked up from the working directory by [`ExportConfig::load`]
pub const CONFIG_FILE_NAME: &str = "stl-extract.toml";

/// Persisted export defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// STL encoding
    pub format: Encoding,
    /// Element scope
    pub scope: ExportScope,
    /// Also export open linked models
    pub include_linked: bool,
    /// Write material colors (binary only)
    pub color: bool,
    /// Write shared project coordinates
    pub shared_coordinates: bool,
    /// Output unit; internal units when unset
    pub unit: Option<LengthUnit>,
    /// Category names to export; empty exports all
    pub categories: Vec<String>,
    /// Binary header text
    pub header_label: String,
    /// Terminate ASCII output with `endsolid`
    pub ascii_endsolid: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: Encoding::Binary,
            scope: ExportScope::All,
            include_linked: false,
            color: false,
            shared_coordinates: false,
            unit: None,
            categories: Vec::new(),
            header_label: DEFAULT_HEADER_LABEL.to_string(),
            ascii_endsolid: false,
        }
    }
}

impl ExportConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ExportConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `stl-extract.toml` from the working directory with environment
    /// variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE_NAME).exists() {
            Self::from_file(CONFIG_FILE_NAME)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `STL_EXTRACT_*` overrides looked up through `var`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(format) = var("STL_EXTRACT_FORMAT") {
            self.format = format
                .parse()
                .map_err(|e: String| anyhow!(e))
                .context("Invalid STL_EXTRACT_FORMAT")?;
        }

        if let Some(unit) = var("STL_EXTRACT_UNIT") {
            self.unit = Some(
                unit.parse()
                    .map_err(|e: String| anyhow!(e))
                    .context("Invalid STL_EXTRACT_UNIT")?,
            );
        }

        if let Some(linked) = var("STL_EXTRACT_INCLUDE_LINKED") {
            self.include_linked = linked
                .trim()
                .parse::<bool>()
                .context("Invalid STL_EXTRACT_INCLUDE_LINKED")?;
        }

        if let Some(color) = var("STL_EXTRACT_COLOR") {
            self.color = color.trim().parse::<bool>().context("Invalid STL_EXTRACT_COLOR")?;
        }

        if let Some(shared) = var("STL_EXTRACT_SHARED_COORDINATES") {
            self.shared_coordinates = shared
                .trim()
                .parse::<bool>()
                .context("Invalid STL_EXTRACT_SHARED_COORDINATES")?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Build export settings, resolving category names (case-insensitive)
    /// against the categories of the active and linked documents
    pub fn to_settings<H: HostModel + ?Sized>(&self, host: &H) -> Result<ExportSettings> {
        let mut settings = ExportSettings::new(self.format)
            .with_scope(self.scope)
            .with_linked(self.include_linked)
            .with_color(self.color)
            .with_shared_coordinates(self.shared_coordinates)
            .with_unit(self.unit);
        settings.header_label = self.header_label.clone();
        settings.ascii_endsolid = self.ascii_endsolid;

        if !self.categories.is_empty() {
            let known = MeshExtractor::new(host).list_categories(true);
            let mut selected = Vec::with_capacity(self.categories.len());
            for name in &self.categories {
                let category = known
                    .iter()
                    .find(|(known_name, _)| known_name.eq_ignore_ascii_case(name.trim()))
                    .map(|(_, category)| category.id);
                match category {
                    Some(id) => selected.push(id),
                    None => bail!("Unknown category: {}", name),
                }
            }
            settings = settings.with_categories(selected);
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Category, CategoryId, MemoryDocument, MemoryModel};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ExportConfig = toml::from_str("format = \"ascii\"\nunit = \"millimeters\"").unwrap();
        assert_eq!(config.format, Encoding::Ascii);
        assert_eq!(config.unit, Some(LengthUnit::Millimeters));
        assert_eq!(config.header_label, "name");
        assert!(!config.ascii_endsolid);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = ExportConfig {
            scope: ExportScope::OnlyVisibleInActiveView,
            color: true,
            categories: vec!["Walls".into()],
            ..ExportConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(ExportConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ExportConfig::default();
        config
            .apply_env(vars(&[
                ("STL_EXTRACT_FORMAT", "ascii"),
                ("STL_EXTRACT_UNIT", "m"),
                ("STL_EXTRACT_INCLUDE_LINKED", "true"),
                ("STL_EXTRACT_COLOR", "false"),
            ]))
            .unwrap();

        assert_eq!(config.format, Encoding::Ascii);
        assert_eq!(config.unit, Some(LengthUnit::Meters));
        assert!(config.include_linked);
        assert!(!config.color);
        assert!(!config.shared_coordinates);
    }

    #[test]
    fn test_invalid_env_flag_is_an_error() {
        let mut config = ExportConfig {
            color: true,
            ..ExportConfig::default()
        };
        let err = config
            .apply_env(vars(&[("STL_EXTRACT_COLOR", "not-a-bool")]))
            .unwrap_err();
        assert!(err.to_string().contains("STL_EXTRACT_COLOR"));
        assert!(config.color);

        assert!(ExportConfig::default()
            .apply_env(vars(&[("STL_EXTRACT_SHARED_COORDINATES", "1")]))
            .is_err());
    }

    #[test]
    fn test_invalid_env_format_is_an_error() {
        let mut config = ExportConfig::default();
        assert!(config
            .apply_env(vars(&[("STL_EXTRACT_FORMAT", "obj")]))
            .is_err());
    }

    #[test]
    fn test_to_settings_resolves_categories() {
        let mut doc = MemoryDocument::new("Main");
        doc.add_category(Category::new(10, "Walls"));
        doc.add_category(Category::new(20, "Floors"));
        let mut model = MemoryModel::new();
        model.add_document(doc);

        let config = ExportConfig {
            categories: vec!["walls".into(), " Floors ".into()],
            shared_coordinates: true,
            ..ExportConfig::default()
        };
        let settings = config.to_settings(&model).unwrap();
        assert!(settings.shared_coordinates);
        assert_eq!(
            settings.categories.into_iter().collect::<Vec<_>>(),
            vec![CategoryId(10), CategoryId(20)]
        );

        let unknown = ExportConfig {
            categories: vec!["Doors".into()],
            ..ExportConfig::default()
        };
        assert!(unknown.to_settings(&model).is_err());
    }
}
