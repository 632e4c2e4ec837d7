// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! stl-extract CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use stl_extract::cli::{exit_code, Reporter, Runner};
use stl_extract::{import_scene_file, inspect_stl, Encoding, ExportConfig, ExportOutcome};
use stl_extract::{ExportScope, LengthUnit, MeshExtractor};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stl-extract")]
#[command(about = "Export BIM scene geometry to binary or ASCII STL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene file to STL
    Export {
        /// Input scene (.json)
        scene: PathBuf,

        /// Output STL file
        #[arg(short, long)]
        output: PathBuf,

        /// STL encoding (binary, ascii)
        #[arg(short, long)]
        format: Option<Encoding>,

        /// Element scope (all, visible)
        #[arg(long)]
        scope: Option<ExportScope>,

        /// Also export open linked models
        #[arg(long)]
        include_linked: bool,

        /// Write material colors (binary only)
        #[arg(long)]
        color: bool,

        /// Write shared project coordinates
        #[arg(long)]
        shared_coordinates: bool,

        /// Output length unit
        #[arg(short, long)]
        unit: Option<LengthUnit>,

        /// Category to export; repeat for several
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Configuration file (defaults to ./stl-extract.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List element categories of a scene
    Categories {
        /// Input scene (.json)
        scene: PathBuf,

        /// Include every category of the active and linked documents
        #[arg(long)]
        all_documents: bool,
    },

    /// Print triangle count and bounds of an STL file
    Inspect {
        /// STL file
        file: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Export {
            scene,
            output,
            format,
            scope,
            include_linked,
            color,
            shared_coordinates,
            unit,
            categories,
            config,
        } => {
            let mut config = match config {
                Some(path) => {
                    let mut config = ExportConfig::from_file(path)?;
                    config.apply_env(|key| std::env::var(key).ok())?;
                    config
                }
                None => ExportConfig::load()?,
            };

            if let Some(format) = format {
                config.format = format;
            }
            if let Some(scope) = scope {
                config.scope = scope;
            }
            if unit.is_some() {
                config.unit = unit;
            }
            if !categories.is_empty() {
                config.categories = categories;
            }
            config.include_linked |= include_linked;
            config.color |= color;
            config.shared_coordinates |= shared_coordinates;

            export_command(&scene, &output, &config)?;
        }
        Commands::Categories {
            scene,
            all_documents,
        } => {
            let model = import_scene_file(&scene)?;
            let categories = MeshExtractor::new(&model).list_categories(all_documents);
            Reporter::report_categories(&categories);
        }
        Commands::Inspect { file } => {
            let summary = inspect_stl(&file)?;
            Reporter::report_summary(&file, &summary);
        }
        Commands::Version => {
            println!("stl-extract v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn export_command(scene: &Path, output: &Path, config: &ExportConfig) -> Result<()> {
    if !scene.exists() {
        Reporter::report_error(&format!("Scene file not found: {}", scene.display()));
        std::process::exit(1);
    }

    let outcome = Runner::new().run_export(scene, output, config)?;

    match &outcome {
        ExportOutcome::Success(report) => Reporter::report_export(output, report),
        ExportOutcome::Failure(error) if error.is_empty_result() => {
            Reporter::report_warning(&error.to_string())
        }
        ExportOutcome::Failure(error) => Reporter::report_error(&error.to_string()),
        ExportOutcome::Cancelled => Reporter::report_info("Export cancelled"),
    }

    let code = exit_code(&outcome);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
