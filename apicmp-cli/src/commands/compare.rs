//! Compare command - Structural API diff between two package versions
//!
//! Loads facts manifests for every compare set, diffs them and reports the
//! public surface that a consumer of the left version would lose.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tracing::{info, warn};

use apicmp_core::compare::{compare_package, CompareSet};
use apicmp_core::exporter::{html, json, markdown};
use apicmp_core::provider::json::MANIFEST_EXTENSION;
use apicmp_core::provider::JsonFactsProvider;
use apicmp_core::{ComparisonFailure, PackageDescription, PackageReport};

use crate::config::ApicmpConfig;
use crate::output::{Output, OutputConfig, OutputFormat, Outputter, TableOutput};
use crate::reporter::{resolve_root, ReportWriter, OUTPUT_ROOT_ENV};

/// Arguments of `apicmp compare`.
#[derive(Debug, Clone)]
pub struct CompareArgs {
    pub package: String,
    pub left_version: String,
    pub right_version: String,
    pub sets: Vec<CompareSet>,
    pub left_dir: Option<PathBuf>,
    pub right_dir: Option<PathBuf>,
    pub write: bool,
    pub output_root: Option<PathBuf>,
    pub deny_breaking: bool,
}

impl CompareArgs {
    fn description(&self) -> PackageDescription {
        PackageDescription::new(&self.package, &self.left_version, &self.right_version)
    }
}

/// Parse a `--set` value of the form `<identity>=<left.json>,<right.json>`.
pub fn parse_set(s: &str) -> Result<CompareSet, String> {
    let (identity, modules) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <identity>=<left>,<right>, got '{}'", s))?;
    let (left, right) = modules
        .split_once(',')
        .ok_or_else(|| format!("expected two comma separated modules, got '{}'", modules))?;

    let identity = identity.trim();
    let (left, right) = (left.trim(), right.trim());
    if identity.is_empty() || left.is_empty() || right.is_empty() {
        return Err(format!("identity and both modules must be non-empty in '{}'", s));
    }

    Ok(CompareSet::new(identity, left, right))
}

fn manifests_by_stem(dir: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let mut manifests = BTreeMap::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(MANIFEST_EXTENSION)
        {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) {
            manifests.insert(stem, path);
        }
    }

    Ok(manifests)
}

/// Pair the facts manifests of two directories by file stem.
///
/// Sets come out sorted by identity. Manifests present on only one side
/// are logged and skipped.
pub fn pair_dirs(left_dir: &Path, right_dir: &Path) -> Result<Vec<CompareSet>> {
    let left = manifests_by_stem(left_dir)?;
    let mut right = manifests_by_stem(right_dir)?;

    let mut sets = Vec::with_capacity(left.len());
    for (stem, left_path) in left {
        match right.remove(&stem) {
            Some(right_path) => sets.push(CompareSet::new(stem, left_path, right_path)),
            None => warn!("Skipping {}: no counterpart in {}", stem, right_dir.display()),
        }
    }
    for stem in right.keys() {
        warn!("Skipping {}: no counterpart in {}", stem, left_dir.display());
    }

    Ok(sets)
}

fn resolve_sets(args: &CompareArgs) -> Result<Vec<CompareSet>> {
    if !args.sets.is_empty() {
        return Ok(args.sets.clone());
    }
    match (&args.left_dir, &args.right_dir) {
        (Some(left), Some(right)) => pair_dirs(left, right),
        _ => anyhow::bail!("Nothing to compare: pass --set or both --left-dir and --right-dir"),
    }
}

/// Render a report as a standalone document.
pub fn render_document(report: &PackageReport, format: OutputFormat) -> Result<String> {
    Ok(match format.document_format() {
        OutputFormat::Json => json::export(report, true)?,
        OutputFormat::Markdown => markdown::export(report),
        OutputFormat::Html | OutputFormat::Table => html::export(report),
    })
}

/// Render a package-level failure in place of the report document.
///
/// JSON gets a structured document, other formats get the plain failure text.
pub fn render_failure(failure: &ComparisonFailure, format: OutputFormat) -> Result<String> {
    Ok(match format.document_format() {
        OutputFormat::Json => json::export_failure(failure, true)?,
        _ => failure.report_text(),
    })
}

/// Result of a compare run
#[derive(Debug, Serialize)]
pub struct CompareResult {
    #[serde(flatten)]
    pub report: PackageReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written: Option<PathBuf>,
    pub duration_ms: u64,
}

impl Outputter for CompareResult {
    fn to_table(&self, config: &OutputConfig) -> String {
        let report = &self.report;
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} {} -> {}\n",
            "COMPARE:".cyan().bold(),
            report.description.package_id,
            report.description.versions.left_version.yellow(),
            report.description.versions.right_version.green()
        ));

        let rows: Vec<Vec<String>> = report
            .compare_sets
            .iter()
            .map(|set| {
                vec![
                    set.identity.clone(),
                    set.summary.text(),
                    set.missing.missing_types.len().to_string(),
                    set.missing.missing_member_count().to_string(),
                    (set.deprecations.types.len() + set.deprecations.members.len()).to_string(),
                ]
            })
            .collect();
        output.push_str(&TableOutput::from_rows(
            &["Compare set", "Changes", "Missing types", "Missing members", "Obsolete"],
            &rows,
            &[2, 3, 4],
            config,
        ));
        output.push('\n');

        for set in report.compare_sets.iter().filter(|s| s.missing.is_breaking()) {
            output.push_str(&format!("\n{}\n", set.identity.bold()));
            for missing_type in &set.missing.missing_types {
                output.push_str(&format!("  {} {}\n", "-".red(), missing_type.red()));
            }
            for missing in &set.missing.types {
                for member in missing.qualified_names() {
                    output.push_str(&format!("  {} {}\n", "-".red(), member));
                }
            }
        }

        if !report.failures.is_empty() {
            output.push_str(&format!("\n{}\n", "FAILED COMPARE SETS:".red().bold()));
            for failure in &report.failures {
                output.push_str(&format!(
                    "  {}: {}\n",
                    failure.compare_set_identity.yellow(),
                    failure.error
                ));
            }
        }

        output.push('\n');
        if report.is_breaking() {
            output.push_str(&"Public API was removed.".red().bold().to_string());
        } else if !report.is_complete() {
            output.push_str(&"Not every compare set could be checked.".yellow().bold().to_string());
        } else {
            output.push_str(&"No public API was removed.".green().to_string());
        }
        output.push_str(&format!(" ({}ms)", self.duration_ms));

        if let Some(path) = &self.written {
            output.push_str(&format!("\n{} {}", "Report written to".dimmed(), path.display()));
        }

        output
    }

    fn to_markdown(&self, _config: &OutputConfig) -> String {
        markdown::export(&self.report)
    }

    fn to_html(&self, _config: &OutputConfig) -> String {
        html::export(&self.report)
    }
}

/// Run the compare command
pub fn run(args: CompareArgs, config: &ApicmpConfig, output: OutputConfig) -> Result<()> {
    let start = Instant::now();
    let description = args.description();
    let sets = resolve_sets(&args)?;
    let policy = config.policy();

    let writer = if args.write {
        let root = resolve_root(
            args.output_root.as_deref(),
            std::env::var_os(OUTPUT_ROOT_ENV),
            config,
        )?;
        Some(ReportWriter::new(&root, config.report_directory()))
    } else {
        None
    };
    let extension = output.format.file_extension();

    let comparison = match compare_package(&description, &sets, &JsonFactsProvider::new()) {
        Ok(comparison) => comparison,
        Err(failure) => {
            if let Some(writer) = &writer {
                let document = render_failure(&failure, output.format)?;
                let path = writer.write_failure(&failure, extension, &document)?;
                info!("Wrote failure report {}", path.display());
            }
            return Err(failure.into());
        }
    };

    let report = PackageReport::build(&comparison, &policy);
    let written = match &writer {
        Some(writer) => {
            let document = render_document(&report, output.format)?;
            Some(writer.write(&description, extension, &document)?)
        }
        None => None,
    };

    let breaking = report.is_breaking();
    let failed_sets: Vec<String> = report
        .failures
        .iter()
        .map(|failure| failure.compare_set_identity.clone())
        .collect();
    let result = CompareResult {
        report,
        written,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    Output::with_config(result, output).render()?;

    if args.deny_breaking {
        if breaking {
            anyhow::bail!("{} removes public API", description.report_stem());
        }
        if !failed_sets.is_empty() {
            anyhow::bail!(
                "{} was not fully checked, failed compare sets: {}",
                description.report_stem(),
                failed_sets.join(", ")
            );
        }
    }
    Ok(())
}
