//! apicmp configuration loading from `.apicmprc.toml`.
//!
//! Configuration is optional. apicmp falls back to defaults when the file is
//! missing, and logs a warning when it cannot be read or parsed.
//!
//! # Example Configuration
//!
//! ```toml
//! [output]
//! format = "table"
//! color = true
//!
//! [report]
//! root = "/srv/www"
//! directory = "Comparisons"
//!
//! [policy]
//! skip_compiler_generated = false
//! ```

use serde::Deserialize;
use std::path::Path;

use apicmp_core::PublicSurfacePolicy;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = ".apicmprc.toml";

/// Directory under the report root that receives report files.
pub const DEFAULT_REPORT_DIRECTORY: &str = "Comparisons";

/// Root configuration structure loaded from `.apicmprc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct ApicmpConfig {
    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Where written reports go.
    #[serde(default)]
    pub report: ReportSettings,

    /// Breaking-change policy knobs.
    #[serde(default)]
    pub policy: PolicySettings,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table`, `json`, `markdown` or `html`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Unset means auto-detect.
    #[serde(default)]
    pub color: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ReportSettings {
    /// Report root, used when neither `--output-root` nor
    /// `APICMP_OUTPUT_ROOT` is given.
    #[serde(default)]
    pub root: Option<String>,

    /// Subdirectory of the root. Default: `Comparisons`.
    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PolicySettings {
    /// Do not report members flagged as compiler generated.
    #[serde(default)]
    pub skip_compiler_generated: bool,
}

impl ApicmpConfig {
    /// Load configuration from `.apicmprc.toml` in the given directory.
    ///
    /// Read and parse errors are logged as warnings and yield defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    pub fn report_root(&self) -> Option<&Path> {
        self.report.root.as_deref().map(Path::new)
    }

    pub fn report_directory(&self) -> &str {
        self.report
            .directory
            .as_deref()
            .unwrap_or(DEFAULT_REPORT_DIRECTORY)
    }

    /// The surface policy described by the `[policy]` section.
    pub fn policy(&self) -> PublicSurfacePolicy {
        PublicSurfacePolicy {
            skip_compiler_generated: self.policy.skip_compiler_generated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ApicmpConfig::default();
        assert!(config.output.format.is_none());
        assert!(config.report_root().is_none());
        assert_eq!(config.report_directory(), "Comparisons");
        assert_eq!(config.policy(), PublicSurfacePolicy::new());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[output]
format = "markdown"
color = false

[report]
root = "/srv/www"
directory = "Reports"

[policy]
skip_compiler_generated = true
"#;
        let config: ApicmpConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.default_format(), Some("markdown"));
        assert_eq!(config.use_color(), Some(false));
        assert_eq!(config.report_root(), Some(Path::new("/srv/www")));
        assert_eq!(config.report_directory(), "Reports");
        assert!(config.policy().skip_compiler_generated);
    }

    #[test]
    fn test_partial_config() {
        let config: ApicmpConfig = toml::from_str("[report]\nroot = \"out\"\n").unwrap();
        assert_eq!(config.report_root(), Some(Path::new("out")));
        assert_eq!(config.report_directory(), "Comparisons");
        assert!(config.use_color().is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = ApicmpConfig::load(dir.path());
        assert!(config.default_format().is_none());
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[output\nformat =").unwrap();

        let config = ApicmpConfig::load(dir.path());
        assert!(config.default_format().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[output]\nformat = \"json\"\n").unwrap();

        let config = ApicmpConfig::load(dir.path());
        assert_eq!(config.default_format(), Some("json"));
    }
}
