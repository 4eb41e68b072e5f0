//! apicmp CLI - Command-line interface for the structural API comparer
//!
//! Compares the declared API surface of two versions of a package and
//! reports the public types and members that disappeared.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;
mod reporter;

use apicmp_core::compare::CompareSet;
use commands::compare::{self, CompareArgs};
use commands::completions;
use config::ApicmpConfig;
use output::{OutputConfig, OutputFormat};

/// Detect breaking changes between two versions of a library.
#[derive(Parser)]
#[command(name = "apicmp")]
#[command(author, version)]
#[command(about = "Detect breaking changes between two versions of a library")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  apicmp compare --package Acme.Lib --left-version 1.0.0 --right-version 2.0.0 \\
      --set Acme.Lib=facts/1.0.0/Acme.Lib.json,facts/2.0.0/Acme.Lib.json
  apicmp compare --package Acme.Lib --left-version 1.0.0 --right-version 2.0.0 \\
      --left-dir facts/1.0.0 --right-dir facts/2.0.0 --write")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Compact output (minified JSON, borderless tables)
    #[arg(long, global = true)]
    compact: bool,

    /// Disable colored output (overrides config and TTY detection)
    #[arg(long, global = true)]
    no_color: bool,

    /// Show detailed version information
    #[arg(long = "version-verbose")]
    version_verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two versions of a package
    #[command(visible_alias = "c")]
    Compare {
        /// Package identifier, e.g. Acme.Lib
        #[arg(short, long)]
        package: String,

        /// Version that consumers upgrade from
        #[arg(long)]
        left_version: String,

        /// Version that consumers upgrade to
        #[arg(long)]
        right_version: String,

        /// Compare set as <identity>=<left.json>,<right.json> (repeatable)
        #[arg(long = "set", value_name = "SET", value_parser = compare::parse_set)]
        sets: Vec<CompareSet>,

        /// Directory of facts manifests for the left version
        #[arg(long, requires = "right_dir", conflicts_with = "sets")]
        left_dir: Option<PathBuf>,

        /// Directory of facts manifests for the right version
        #[arg(long, requires = "left_dir", conflicts_with = "sets")]
        right_dir: Option<PathBuf>,

        /// Write the report to <root>/Comparisons
        #[arg(short, long)]
        write: bool,

        /// Report root directory (default: $APICMP_OUTPUT_ROOT, config, ~/site/wwwroot)
        #[arg(long)]
        output_root: Option<PathBuf>,

        /// Exit with an error when any public API was removed
        #[arg(long)]
        deny_breaking: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: completions::Shell,

        /// Show installation instructions instead of generating completions
        #[arg(long)]
        instructions: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Print verbose version information
fn print_verbose_version() {
    use colored::Colorize;

    let cli_version = env!("CARGO_PKG_VERSION");
    let platform = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    println!("apicmp {}", cli_version);
    println!("  {:<14} {}", "apicmp-cli:".cyan(), cli_version);
    println!("  {:<14} {}", "apicmp-core:".cyan(), apicmp_core::version());
    println!("  {:<14} {}", "Platform:".cyan(), platform);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version_verbose {
        print_verbose_version();
        return Ok(());
    }

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .apicmprc.toml
    let config = ApicmpConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    let mut output = OutputConfig::auto_detect(format, config.use_color());
    if cli.no_color {
        output = output.without_colors();
    }
    if cli.compact {
        output = output.compact();
    }
    colored::control::set_override(output.use_colors());

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Compare {
            package,
            left_version,
            right_version,
            sets,
            left_dir,
            right_dir,
            write,
            output_root,
            deny_breaking,
        } => {
            let args = CompareArgs {
                package,
                left_version,
                right_version,
                sets,
                left_dir,
                right_dir,
                write,
                output_root,
                deny_breaking,
            };
            // Diffing is CPU bound and fans out on rayon.
            tokio::task::spawn_blocking(move || compare::run(args, &config, output)).await?
        }

        Commands::Completions {
            shell,
            instructions,
        } => {
            if instructions {
                completions::show_instructions(shell, output)
            } else {
                let mut cmd = Cli::command();
                completions::generate_completions(shell, &mut cmd);
                Ok(())
            }
        }
    }
}
