//! schema-hunter CLI.
//!
//! `scan` builds the annotation glossary for a source tree; `compare`
//! checks two JSON documents for order-insensitive equivalence.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;

use clap::{Parser, Subcommand};
use schema_hunter::compare::{compare_files, CompareOptions};
use schema_hunter::json::canonical::{CanonicalOptions, DEFAULT_MAX_PASSES};
use schema_hunter::scan::{self, write_glossary, NamespacePolicy, OutputPaths, PendingLog, ScanOptions};
use schema_hunter::{HunterError, HunterResult};
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "schema-hunter")]
#[command(about = "Annotation glossary scanner and JSON equivalence checker", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map every annotation type under a source tree to its package
    ///
    /// Writes `<timestamp>-<root>.json` and a matching `.log` file to the
    /// output directory.
    Scan {
        /// Root folder to scan
        root: PathBuf,

        /// Directory for the glossary and log
        #[arg(default_value = ".")]
        output_dir: PathBuf,

        /// Record annotations from files without a package statement under ""
        #[arg(long)]
        allow_missing_package: bool,

        /// Source file extension to scan
        #[arg(long, default_value = scan::DEFAULT_EXTENSION)]
        extension: String,
    },

    /// Check whether two JSON files match regardless of key and list order
    Compare {
        /// Folder both file names are relative to
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// First file to be compared
        #[arg(long)]
        file1: PathBuf,

        /// Second file to be compared
        #[arg(long)]
        file2: PathBuf,

        /// Write the ordered documents (`_cmp.json`) and sorted-line dumps
        #[arg(short, long)]
        write: bool,

        /// Cap on canonicalization passes
        #[arg(long, default_value_t = DEFAULT_MAX_PASSES)]
        max_passes: usize,
    },
}

/// `RUST_LOG` wins; otherwise `base` plus one step per `-v`.
fn env_filter(base: usize, verbose: u8) -> EnvFilter {
    const LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];
    let level = LEVELS[(base + verbose as usize).min(LEVELS.len() - 1)];
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,schema_hunter={level}")))
}

fn run_scan(root: &Path, output_dir: &Path, options: &ScanOptions, verbose: u8) -> HunterResult<()> {
    if !root.exists() {
        return Err(HunterError::PathNotFound {
            path: root.to_path_buf(),
        });
    }

    let started = Instant::now();
    let paths = OutputPaths::new(root, output_dir, chrono::Local::now().naive_local());
    let log = PendingLog::create(&paths.log)?;

    // Log lines go to stdout and to the run's .log file.
    let subscriber = tracing_subscriber::registry()
        .with(env_filter(1, verbose))
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log.writer()?)));

    tracing::subscriber::with_default(subscriber, || {
        info!("Logging to {}", log.path().display());
        let result = scan::run(root, options).and_then(|outcome| {
            info!("Writing output json to {} ...", paths.glossary.display());
            write_glossary(&outcome.glossary, &paths.glossary)
        });
        match &result {
            Ok(()) => info!("Finished in {:?}.", started.elapsed()),
            Err(e) => error!(kind = e.name(), "{}", e),
        }
        result
    })?;
    // Only a finished scan keeps its log.
    log.commit()
}

fn run_compare(left: &Path, right: &Path, options: CompareOptions, verbose: u8) -> HunterResult<()> {
    // stdout carries the report, so logs go to stderr.
    let subscriber = tracing_subscriber::registry()
        .with(env_filter(0, verbose))
        .with(fmt::layer().with_writer(std::io::stderr));

    let report = tracing::subscriber::with_default(subscriber, || {
        compare_files(left, right, options)
    })?;
    print!("{report}");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan {
            root,
            output_dir,
            allow_missing_package,
            extension,
        } => {
            let options = ScanOptions {
                extension,
                namespace_policy: if allow_missing_package {
                    NamespacePolicy::AllowEmpty
                } else {
                    NamespacePolicy::Strict
                },
                ..ScanOptions::default()
            };
            run_scan(&root, &output_dir, &options, cli.verbose)
        }
        Commands::Compare {
            folder,
            file1,
            file2,
            write,
            max_passes,
        } => {
            let folder = folder.unwrap_or_default();
            let options = CompareOptions {
                write_artifacts: write,
                canonical: CanonicalOptions { max_passes },
            };
            run_compare(&folder.join(file1), &folder.join(file2), options, cli.verbose)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
