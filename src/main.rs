use anyhow::{Context, bail};
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use letter_index::executor::executor::MapReduceJob;
use letter_index::executor::types::{JobConfig, RunReport, SyncStrategy};
use letter_index::ingestion::types::Manifest;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Build a per-letter inverted index over the files listed in a manifest
#[derive(Parser, Debug)]
#[command(name = "letter-index", version)]
struct Cli {
    /// Number of mapper threads
    #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    num_mappers: usize,

    /// Number of reducer threads
    #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    num_reducers: usize,

    /// Manifest: a file count followed by that many file paths
    manifest: PathBuf,

    /// Directory receiving the <letter>.txt files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// How reducers wait for the map phase to finish
    #[arg(long, value_enum, default_value_t = SyncStrategy::Join)]
    sync: SyncStrategy,

    /// Exit with an error if any input was skipped or any output could not be written
    #[arg(long)]
    strict: bool,

    /// Write the run report as JSON to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .init();

    let manifest = Manifest::load(&cli.manifest)?;

    let config = JobConfig::new(cli.num_mappers, cli.num_reducers)
        .with_output_dir(&cli.output_dir)
        .with_sync(cli.sync)
        .with_strict(cli.strict);

    let report = MapReduceJob::new(config.clone(), manifest).run()?;

    if let Some(path) = &cli.summary {
        write_summary(path, &report)?;
    }

    if config.strict && report.has_failures() {
        bail!(
            "Run finished with {} skipped inputs and {} failed outputs",
            report.skipped_files.len(),
            report.failed_letters.len()
        );
    }

    Ok(())
}

fn write_summary(path: &Path, report: &RunReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write run report to {}", path.display()))?;
    tracing::info!("Run report written to {}", path.display());
    Ok(())
}
