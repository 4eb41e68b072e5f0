//! Writes report files for a package run.
//!
//! Reports land in `<root>/<directory>/<package>-<left>...<right>.<ext>`.
//! Any `.running.<ext>` placeholder left next to the report by a scheduler
//! is removed once the report (or the failure document) has been written.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use apicmp_core::{ComparisonFailure, PackageDescription};

use crate::config::ApicmpConfig;

/// Environment variable naming the report root.
pub const OUTPUT_ROOT_ENV: &str = "APICMP_OUTPUT_ROOT";

/// Resolve the report root.
///
/// Precedence: the `--output-root` flag, then `APICMP_OUTPUT_ROOT`, then
/// `[report].root` from the config, then `<home>/site/wwwroot`.
pub fn resolve_root(
    flag: Option<&Path>,
    env: Option<OsString>,
    config: &ApicmpConfig,
) -> Result<PathBuf> {
    if let Some(root) = flag {
        return Ok(root.to_path_buf());
    }
    if let Some(root) = env.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    if let Some(root) = config.report_root() {
        return Ok(root.to_path_buf());
    }
    match dirs::home_dir() {
        Some(home) => Ok(home.join("site").join("wwwroot")),
        None => anyhow::bail!(
            "No report root could be found. Pass --output-root or set {}",
            OUTPUT_ROOT_ENV
        ),
    }
}

/// Writes reports into one directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: PathBuf,
}

impl ReportWriter {
    pub fn new(root: &Path, directory: &str) -> Self {
        Self {
            directory: root.join(directory),
        }
    }

    /// Final path of the report for `description`.
    pub fn report_path(&self, description: &PackageDescription, extension: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}", description.report_stem(), extension))
    }

    /// Path of the in-progress placeholder for `description`.
    pub fn running_path(&self, description: &PackageDescription, extension: &str) -> PathBuf {
        self.directory
            .join(format!("{}.running.{}", description.report_stem(), extension))
    }

    /// Write a rendered report and clear the placeholder.
    pub fn write(
        &self,
        description: &PackageDescription,
        extension: &str,
        contents: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!("Failed to create report directory {}", self.directory.display())
        })?;

        let path = self.report_path(description, extension);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        debug!("Wrote report {}", path.display());

        self.remove_placeholder(description, extension)?;
        Ok(path)
    }

    /// Write a rendered failure document in place of the report.
    pub fn write_failure(
        &self,
        failure: &ComparisonFailure,
        extension: &str,
        contents: &str,
    ) -> Result<PathBuf> {
        let description = PackageDescription {
            package_id: failure.package_id.clone(),
            versions: failure.versions.clone(),
        };
        self.write(&description, extension, contents)
    }

    fn remove_placeholder(&self, description: &PackageDescription, extension: &str) -> Result<()> {
        let running = self.running_path(description, extension);
        match fs::remove_file(&running) {
            Ok(()) => {
                debug!("Removed placeholder {}", running.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove placeholder {}", running.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicmp_core::error::FactsProviderError;
    use tempfile::TempDir;

    fn description() -> PackageDescription {
        PackageDescription::new("Acme.Lib", "1.0.0", "2.0.0")
    }

    #[test]
    fn test_resolve_root_precedence() {
        let config: ApicmpConfig = toml::from_str("[report]\nroot = \"from-config\"\n").unwrap();

        let root = resolve_root(
            Some(Path::new("from-flag")),
            Some(OsString::from("from-env")),
            &config,
        )
        .unwrap();
        assert_eq!(root, PathBuf::from("from-flag"));

        let root = resolve_root(None, Some(OsString::from("from-env")), &config).unwrap();
        assert_eq!(root, PathBuf::from("from-env"));

        let root = resolve_root(None, Some(OsString::new()), &config).unwrap();
        assert_eq!(root, PathBuf::from("from-config"));
    }

    #[test]
    fn test_resolve_root_home_fallback() {
        if let Some(home) = dirs::home_dir() {
            let root = resolve_root(None, None, &ApicmpConfig::default()).unwrap();
            assert_eq!(root, home.join("site").join("wwwroot"));
        }
    }

    #[test]
    fn test_report_path() {
        let writer = ReportWriter::new(Path::new("/srv"), "Comparisons");
        assert_eq!(
            writer.report_path(&description(), "html"),
            PathBuf::from("/srv/Comparisons/Acme.Lib-1.0.0...2.0.0.html")
        );
        assert_eq!(
            writer.running_path(&description(), "html"),
            PathBuf::from("/srv/Comparisons/Acme.Lib-1.0.0...2.0.0.running.html")
        );
    }

    #[test]
    fn test_write_creates_directory_and_removes_placeholder() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path(), "Comparisons");

        fs::create_dir_all(dir.path().join("Comparisons")).unwrap();
        let running = writer.running_path(&description(), "md");
        fs::write(&running, "").unwrap();

        let path = writer.write(&description(), "md", "# report").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# report");
        assert!(!running.exists());
    }

    #[test]
    fn test_write_without_placeholder() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path(), "Reports");

        let path = writer.write(&description(), "json", "{}").unwrap();
        assert!(path.starts_with(dir.path().join("Reports")));
    }

    #[test]
    fn test_write_failure() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path(), "Comparisons");
        let failure = ComparisonFailure::new(
            &description(),
            FactsProviderError::NotFound {
                module: PathBuf::from("1.0.0/Acme.Lib.json"),
            },
        );

        let path = writer
            .write_failure(&failure, "html", &failure.report_text())
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert_eq!(path, dir.path().join("Comparisons/Acme.Lib-1.0.0...2.0.0.html"));

        assert!(text.starts_with(
            "Acme.Lib comparison between 1.0.0 and 2.0.0 has failed with the following error: "
        ));
    }
}
