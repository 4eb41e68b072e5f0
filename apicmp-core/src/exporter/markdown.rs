//! Markdown format exporter.

use crate::compare::FailedCompareSet;
use crate::report::{CompareSetReport, PackageReport};

/// Export a package report to Markdown.
pub fn export(report: &PackageReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# {}", report.title()));
    lines.push(String::new());

    for set in &report.compare_sets {
        lines.push(export_compare_set(set));
    }

    if !report.failures.is_empty() {
        lines.push(export_failures(&report.failures));
    }

    lines.join("\n")
}

/// Export a single compare set.
fn export_compare_set(set: &CompareSetReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!("## {}", set.identity));
    lines.push(String::new());
    lines.push(format!("_{}_", set.summary.text()));
    lines.push(String::new());

    lines.push("The following types are missing in the new API.".to_string());
    lines.push(String::new());
    for missing_type in &set.missing.missing_types {
        lines.push(format!("    {}", missing_type));
    }
    lines.push(String::new());

    lines.push("The following members are missing on the public types.".to_string());
    lines.push(String::new());
    for missing in &set.missing.types {
        lines.push(format!("    {}", missing.type_name));
        for member in missing.qualified_names() {
            lines.push(format!("        {}", member));
        }
        lines.push(String::new());
    }

    if !set.deprecations.is_empty() {
        lines.push("The following public API became obsolete.".to_string());
        lines.push(String::new());
        for name in set.deprecations.types.iter().chain(&set.deprecations.members) {
            lines.push(format!("    {}", name));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn export_failures(failures: &[FailedCompareSet]) -> String {
    let mut lines = vec!["## Failed compare sets".to_string(), String::new()];
    for failure in failures {
        lines.push(format!("- `{}`: {}", failure.compare_set_identity, failure.error));
    }
    lines.push(String::new());
    lines.join("\n")
}
