//! code-collector CLI - Command-line interface for the collector library
//!
//! This binary uses Clap for argument parsing. All core logic lives in the
//! library; this file only wires arguments, logging and output streams.
//!
//! Logs and warnings go to stderr so stdout carries nothing but the document.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use code_collector::core::{load_config, CleanMode, Collector, ExtractionSpec, PartialResult};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Collect project files and snippets into a single Markdown document.
#[derive(Parser, Debug)]
#[command(name = "code-collector")]
#[command(version = code_collector::VERSION)]
#[command(about = "Collect project files and snippets into a single Markdown document.")]
#[command(after_help = "Examples:
  # Collect whole files
  code-collector . --mode batch --files src/main.py src/util.py -o context.md

  # Pull a function and a line range, appending to an existing document
  code-collector . --mode snippets --target src/calc.py \\
      --ranges '[{\"type\":\"function\",\"name\":\"calculate_total\"},{\"type\":\"lines\",\"start\":10,\"end\":50}]' \\
      -o context.md --append
")]
struct Cli {
    // ═══════════════════════════════════════════════════════════════════════════
    // CORE ARGUMENTS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The root directory of the project
    #[arg(value_name = "PROJECT_PATH")]
    project_path: PathBuf,

    /// What to extract: whole files or snippets of one file
    #[arg(long = "mode", value_enum)]
    mode: Mode,

    /// Output file path. Defaults to standard output.
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to a JSON configuration file.
    /// Defaults to <PROJECT_PATH>/.code_collector.json
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    config: Option<PathBuf>,

    // ═══════════════════════════════════════════════════════════════════════════
    // EXTRACTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Files to collect (batch mode)
    #[arg(long = "files", value_name = "FILE", num_args = 1..)]
    files: Vec<String>,

    /// File to extract snippets from (snippets mode)
    #[arg(long = "target", value_name = "FILE")]
    target: Option<String>,

    /// JSON array of extraction ranges (snippets mode)
    #[arg(long = "ranges", value_name = "JSON")]
    ranges: Option<String>,

    /// Why the material is being collected; shown in the header and at the end
    #[arg(long = "intent", value_name = "TEXT")]
    intent: Option<String>,

    // ═══════════════════════════════════════════════════════════════════════════
    // OUTPUT SHAPING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Merge into the existing output document instead of overwriting it
    #[arg(long = "append")]
    append: bool,

    /// Cleaning applied to collected code. Overrides the config file.
    #[arg(long = "clean", value_enum)]
    clean: Option<CleanArg>,

    /// Keep generated/vendor files that would otherwise be filtered
    #[arg(long = "no-junk-filter")]
    no_junk_filter: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Batch,
    Snippets,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CleanArg {
    None,
    Comments,
    Skeleton,
}

impl From<CleanArg> for CleanMode {
    fn from(arg: CleanArg) -> Self {
        match arg {
            CleanArg::None => CleanMode::None,
            CleanArg::Comments => CleanMode::Comments,
            CleanArg::Skeleton => CleanMode::Skeleton,
        }
    }
}

/// Logs go to stderr; `CODE_COLLECTOR_LOG` overrides the `warn` default
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CODE_COLLECTOR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_skipped(partial: &PartialResult) {
    if partial.skipped.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("⚠️  {} file(s) were skipped:", partial.skipped.len());
    for entry in &partial.skipped {
        eprintln!("   - {}: {}", entry.path, entry.reason);
    }
    eprintln!("   Use --mode snippets to pull specific functions or line ranges from them.");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if !cli.project_path.is_dir() {
        bail!("project path '{}' must be a directory", cli.project_path.display());
    }

    let mut config = load_config(cli.config.as_deref(), &cli.project_path).context("loading configuration")?;
    if let Some(clean) = cli.clean {
        config.clean_mode = clean.into();
    }
    if cli.no_junk_filter {
        config.remove_junk = false;
    }

    let collector = Collector::with_config(&cli.project_path, config)?;

    let partial = match cli.mode {
        Mode::Batch => {
            if cli.files.is_empty() {
                bail!("batch mode requires --files");
            }
            collector.batch_import(&cli.files)
        }
        Mode::Snippets => {
            let (Some(target), Some(ranges)) = (cli.target.as_deref(), cli.ranges.as_deref()) else {
                bail!("snippets mode requires --target and --ranges");
            };
            let specs = ExtractionSpec::parse_list(ranges)?;
            collector
                .extract_snippets(target, &specs)
                .with_context(|| format!("extracting snippets from {}", target))?
        }
    };

    let previous = match (&cli.output, cli.append) {
        (Some(path), true) if path.exists() => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading existing document {}", path.display()))?,
        ),
        (None, true) => {
            tracing::warn!("--append has no effect without --output");
            None
        }
        _ => None,
    };

    let markdown = collector.generate_document(&partial, cli.intent.as_deref(), previous.as_deref());

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &markdown).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Document written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(markdown.as_bytes())?;
            stdout.flush()?;
        }
    }

    report_skipped(&partial);
    Ok(())
}
