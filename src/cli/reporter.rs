// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::extract::ExportReport;
use crate::host::Category;
use crate::io::StlSummary;
use colored::*;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a successful export
    pub fn report_export(output: &Path, report: &ExportReport) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Exported:".bold(), output.display().to_string().cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Encoding:".bright_black(),
            report.encoding.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Triangles:".bright_black(),
            report.triangles_written.to_string().cyan()
        );
        if report.triangles_dropped > 0 {
            println!(
                "  {} {}",
                "Dropped:".bright_black(),
                report.triangles_dropped.to_string().yellow()
            );
        }
        println!(
            "  {} {} documents, {} elements",
            "Scanned:".bright_black(),
            report.documents,
            report.elements
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(report.duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Print categories sorted by name
    pub fn report_categories(categories: &BTreeMap<String, Category>) {
        if categories.is_empty() {
            Self::report_warning("No categories found");
            return;
        }

        println!("{}", "Categories:".bold());
        for (name, category) in categories {
            println!(
                "  {} {}",
                format!("{:>8}", category.id.0).bright_black(),
                name.cyan()
            );
        }
    }

    /// Report what was read back from an STL file
    pub fn report_summary(file: &Path, summary: &StlSummary) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "STL:".bold(), file.display().to_string().cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Triangles:".bright_black(),
            summary.triangle_count.to_string().cyan()
        );
        if summary.degenerate_normals > 0 {
            println!(
                "  {} {}",
                "Zero normals:".bright_black(),
                summary.degenerate_normals.to_string().yellow()
            );
        }
        if !summary.bounding_box.is_empty() {
            let bbox = &summary.bounding_box;
            println!(
                "  {} [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
                "Bounds:".bright_black(),
                bbox.min.x,
                bbox.min.y,
                bbox.min.z,
                bbox.max.x,
                bbox.max.y,
                bbox.max.z
            );
            let size = bbox.size();
            println!(
                "  {} {:.3} x {:.3} x {:.3}",
                "Size:".bright_black(),
                size.x,
                size.y,
                size.z
            );
        }
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }
}
