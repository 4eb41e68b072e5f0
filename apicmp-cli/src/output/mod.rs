//! Output formatting module for the apicmp CLI
//!
//! Every command result renders in one of four formats: table
//! (human-readable), json (machine-readable), markdown and html (report
//! documents).
//!
//! Automatically detects TTY context to decide whether to use colors.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod json;
mod table;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
    /// Markdown report
    Markdown,
    /// HTML report page
    Html,
}

impl OutputFormat {
    /// Extension of a report file written in this format.
    ///
    /// Tables are terminal-only, so written reports fall back to HTML.
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Table | OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }

    /// The format used for a written report.
    pub fn document_format(&self) -> OutputFormat {
        match self {
            OutputFormat::Table => OutputFormat::Html,
            other => *other,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// The output format to use
    pub format: OutputFormat,
    /// Disable colored output
    pub no_color: bool,
    /// Compact mode (minified JSON, borderless tables)
    pub compact: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            no_color: false,
            compact: false,
        }
    }

    /// Create an OutputConfig with automatic TTY detection.
    ///
    /// Colors are disabled when stdout is not a terminal unless
    /// `color_override` forces them on.
    pub fn auto_detect(format: OutputFormat, color_override: Option<bool>) -> Self {
        let use_color = color_override.unwrap_or_else(|| std::io::stdout().is_terminal());
        Self {
            no_color: !use_color,
            ..Self::new(format)
        }
    }

    pub fn use_colors(&self) -> bool {
        !self.no_color
    }

    /// Builder: disable colors
    pub fn without_colors(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Builder: enable compact mode
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

/// Trait for types that can be formatted as output
pub trait Outputter: Serialize + Sized {
    /// Render as table format
    fn to_table(&self, config: &OutputConfig) -> String;

    /// Render as JSON format
    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self, config)
    }

    /// Render as Markdown. Falls back to the table rendering.
    fn to_markdown(&self, config: &OutputConfig) -> String {
        self.to_table(config)
    }

    /// Render as HTML. Falls back to the table rendering.
    fn to_html(&self, config: &OutputConfig) -> String {
        self.to_table(config)
    }

    /// Render using the format specified in config
    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(config),
            OutputFormat::Markdown => self.to_markdown(config),
            OutputFormat::Html => self.to_html(config),
        }
    }

    /// Render and print to stdout
    fn output(&self, config: &OutputConfig) {
        println!("{}", self.render(config));
    }
}

/// Result wrapper for formatted output with automatic format selection
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: Outputter> Output<T> {
    /// Create a new output wrapper with full config
    pub fn with_config(data: T, config: OutputConfig) -> Self {
        Self { data, config }
    }

    /// Render the output to stdout
    pub fn render(&self) -> anyhow::Result<()> {
        self.data.output(&self.config);
        Ok(())
    }
}
