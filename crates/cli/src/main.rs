//! elvscope CLI
//!
//! Breadcrumbs, outlines and fold regions for Elvish scripts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use elvscope_core::{
    format_breadcrumb, format_file, format_folds, format_output, get_breadcrumb, render_file,
    scan_file, AnalysisOptions, ElvishScanner, OutputFormat, PlaceholderStyle, ScanConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Structural navigation for Elvish scripts
#[derive(Parser)]
#[command(name = "elvscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Breadcrumbs, outlines and fold regions for Elvish scripts")]
#[command(long_about = r#"
elvscope: structural navigation for Elvish scripts

Splits scripts into statements, names the function, conditional, loop,
exception or lambda block under a cursor, and computes collapsible regions
for multi-line braces and brackets. Works on incomplete or malformed code.

Output formats:
  - JSON (default) - Structured JSON for programmatic use
  - YAML - Human-readable YAML format
  - ANSI - Colorful terminal output
  - Summary - Plain text overview

Examples:
  elvscope .                                  # Scan current directory
  elvscope --format ansi                      # Colorful terminal output
  elvscope file rc.elv                        # Single file analysis
  elvscope breadcrumb rc.elv --line 10 -c 4   # Breadcrumb at line 10, col 4
  elvscope folds rc.elv --contextual-placeholders
  elvscope render rc.elv --ansi               # Show the file folded
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Json, global = true)]
    pub format: OutputFormatArg,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Ignore patterns (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append, global = true)]
    pub ignore: Vec<String>,

    /// Extra gitignore-style file
    #[arg(long, global = true)]
    pub ignore_file: Option<PathBuf>,

    /// Include hidden files and directories
    #[arg(long, global = true)]
    pub hidden: bool,

    /// Number of threads for parallel processing (default: auto)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Skip brace context inference
    #[arg(long, global = true)]
    pub fast: bool,

    /// Name the enclosing keyword in brace placeholders, e.g. `{fn ...}`
    #[arg(long, global = true)]
    pub contextual_placeholders: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory of Elvish scripts
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Analyze a single file
    File {
        /// Path to file
        path: PathBuf,
    },

    /// Get the breadcrumb at a cursor position
    Breadcrumb {
        /// Path to file
        path: PathBuf,

        /// Line number (1-indexed)
        #[arg(short, long)]
        line: usize,

        /// Column number (0-indexed)
        #[arg(short, long, default_value_t = 0)]
        column: usize,
    },

    /// List the fold regions of a file
    Folds {
        /// Path to file
        path: PathBuf,
    },

    /// Render a file with its outermost regions collapsed
    Render {
        /// File to render
        path: PathBuf,

        /// Output with ANSI colors
        #[arg(long)]
        ansi: bool,
    },
}

/// Output format argument
#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Ansi,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Ansi => OutputFormat::Ansi,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match &args.command {
        Some(Commands::Scan { path }) => run_scan(path, &args),
        Some(Commands::File { path }) => run_file(path, &args),
        Some(Commands::Breadcrumb { path, line, column }) => {
            run_breadcrumb(path, *line, *column, &args)
        }
        Some(Commands::Folds { path }) => run_folds(path, &args),
        Some(Commands::Render { path, ansi }) => run_render(path, *ansi, &args),
        None => run_scan(&args.path, &args),
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build common configuration from args
fn build_config(path: &Path, args: &Args) -> ScanConfig {
    let analysis = AnalysisOptions {
        fast: args.fast,
        placeholder_style: if args.contextual_placeholders {
            PlaceholderStyle::Contextual
        } else {
            PlaceholderStyle::Uniform
        },
    };

    let mut config = ScanConfig::new(path.to_path_buf())
        .with_ignore_patterns(args.ignore.clone())
        .with_include_hidden(args.hidden)
        .with_analysis_options(analysis);

    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    if let Some(ref ignore_file) = args.ignore_file {
        config = config.with_ignore_file(ignore_file.clone());
    }

    config
}

fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    Ok(())
}

/// Lines are 1-indexed
fn require_line(line: usize) -> Result<()> {
    if line == 0 {
        anyhow::bail!("Line numbers start at 1, got 0");
    }
    Ok(())
}

fn run_scan(path: &Path, args: &Args) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    let config = build_config(path, args);

    // Show progress spinner
    let spinner = if args.verbose && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Scanning Elvish scripts...");
        Some(pb)
    } else {
        None
    };

    let scanner = ElvishScanner::new(config).context("Failed to create scanner")?;
    let result = scanner.scan().context("Failed to scan directory")?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} files in {}ms",
            result.stats.total_files, result.metadata.scan_duration_ms
        ));
    }

    let output = format_output(&result, args.format.clone().into())?;
    write_output(&output, args.output.as_ref())
}

fn run_file(path: &Path, args: &Args) -> Result<()> {
    require_file(path)?;
    let config = build_config(path, args);

    let analysis = scan_file(path, &config).context("Failed to analyze file")?;
    let output = format_file(&analysis, args.format.clone().into())?;
    write_output(&output, args.output.as_ref())
}

fn run_breadcrumb(path: &Path, line: usize, column: usize, args: &Args) -> Result<()> {
    require_file(path)?;
    require_line(line)?;
    let config = build_config(path, args);

    let breadcrumb =
        get_breadcrumb(path, line, column, &config).context("Failed to get breadcrumb")?;
    let output = format_breadcrumb(&breadcrumb, args.format.clone().into())?;
    write_output(&output, args.output.as_ref())
}

fn run_folds(path: &Path, args: &Args) -> Result<()> {
    require_file(path)?;
    let config = build_config(path, args);

    let analysis = scan_file(path, &config).context("Failed to analyze file")?;
    let output = format_folds(&analysis, args.format.clone().into())?;
    write_output(&output, args.output.as_ref())
}

fn run_render(path: &Path, ansi: bool, args: &Args) -> Result<()> {
    require_file(path)?;
    let config = build_config(path, args);

    let rendered = render_file(path, &config, ansi).context("Failed to render file")?;
    tracing::debug!(
        folds = rendered.fold_count,
        lines_hidden = rendered.lines_hidden,
        "rendered file"
    );
    write_output(&rendered.content, args.output.as_ref())
}

fn write_output(output: &str, path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{}", output);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_line_rejects_zero() {
        let err = require_line(0).unwrap_err();
        assert!(err.to_string().contains("start at 1"));
        assert!(require_line(1).is_ok());
    }

    #[test]
    fn test_breadcrumb_line_zero_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("rc.elv");
        fs::write(&file, "fn f {\n  echo\n}\n").unwrap();

        let args = Args::parse_from(["elvscope", "breadcrumb", "rc.elv", "--line", "0"]);
        let err = run_breadcrumb(&file, 0, 0, &args).unwrap_err();
        assert!(err.to_string().contains("start at 1"));
    }
}
