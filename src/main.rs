//! dirpull - lazily list the files of a directory tree.
//!
//! Usage:
//!   dirpull [PATH]            List every file, depth-first
//!   dirpull list [PATH]       Same, with output options
//!   dirpull digest [PATH]     BLAKE3 digest of every file
//!   dirpull stats [PATH]      Walk the tree and report traversal statistics
//!   dirpull --help            Show help

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use dirpull_analyze::FileDigester;
use dirpull_core::{WalkConfig, WalkError};
use dirpull_scan::TreeWalker;

#[derive(Parser)]
#[command(
    name = "dirpull",
    version,
    about = "Lazily list the files of a directory tree",
    long_about = "dirpull walks a directory tree depth-first without recursion, \
                  producing one file at a time.\n\n\
                  Set RUST_LOG=debug to trace the traversal."
)]
struct Cli {
    /// Directory to walk (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Sort each directory listing by name
    #[arg(short, long, global = true)]
    sort: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List every file in the tree
    List {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a BLAKE3 digest for every file
    Digest {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Walk the tree and report traversal statistics
    Stats {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::List { path, format }) => run_list(&config(&path, cli.sort), format),
        Some(Command::Digest { path, format }) => run_digest(&config(&path, cli.sort), format),
        Some(Command::Stats { path, format }) => run_stats(&config(&path, cli.sort), format),
        None => run_list(&config(&cli.path, cli.sort), OutputFormat::Text),
    }
}

fn config(path: &Path, sort: bool) -> WalkConfig {
    WalkConfig {
        root: path.to_path_buf(),
        sort_entries: sort,
    }
}

fn open_walker(config: &WalkConfig) -> Result<TreeWalker> {
    TreeWalker::with_config(config)
        .with_context(|| format!("Cannot walk {}", config.root.display()))
}

/// Print every produced path.
fn run_list(config: &WalkConfig, format: OutputFormat) -> Result<()> {
    let walker = open_walker(config)?;

    match format {
        OutputFormat::Text => {
            let mut out = BufWriter::new(io::stdout().lock());
            for path in walker {
                let path = path.context("Traversal failed")?;
                writeln!(out, "{}", path.display())?;
            }
            out.flush()?;
        }
        OutputFormat::Json => {
            let paths: Vec<PathBuf> = walker
                .into_iter()
                .collect::<Result<_, WalkError>>()
                .context("Traversal failed")?;
            println!("{}", serde_json::to_string_pretty(&paths)?);
        }
    }

    Ok(())
}

/// Digest every produced file.
fn run_digest(config: &WalkConfig, format: OutputFormat) -> Result<()> {
    let start = Instant::now();
    let walker = open_walker(config)?;
    let digester = FileDigester::new();

    let mut total_size = 0u64;
    let mut count = 0u64;

    match format {
        OutputFormat::Text => {
            let mut out = BufWriter::new(io::stdout().lock());
            for digest in digester.digest_all(walker) {
                let digest = digest.context("Digest failed")?;
                writeln!(out, "{}  {}", digest.hash, digest.path.display())?;
                total_size += digest.size;
                count += 1;
            }
            out.flush()?;
        }
        OutputFormat::Json => {
            let digests = digester
                .digest_all(walker)
                .collect::<Result<Vec<_>, _>>()
                .context("Digest failed")?;
            total_size = digests.iter().map(|d| d.size).sum();
            count = digests.len() as u64;
            println!("{}", serde_json::to_string_pretty(&digests)?);
        }
    }

    eprintln!(
        "{} files, {} digested in {:.2}s",
        count,
        format_size(total_size),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Drain the walker and report its statistics.
fn run_stats(config: &WalkConfig, format: OutputFormat) -> Result<()> {
    let mut files = open_walker(config)?.into_files();
    for path in files.by_ref() {
        path.context("Traversal failed")?;
    }
    let stats = files.producer().stats();

    match format {
        OutputFormat::Text => {
            println!("{}", "─".repeat(60));
            println!(" {}", config.root.display());
            println!("{}", "─".repeat(60));
            println!(" Files produced:    {}", stats.files_produced);
            println!(" Directories:       {}", stats.dirs_entered);
            println!(" Maximum depth:     {}", stats.max_depth);
            println!(
                " Walked in {:.2}s ({:.0} files/s)",
                stats.elapsed.as_secs_f64(),
                stats.files_per_second()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
