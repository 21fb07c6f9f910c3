//! mdunwrap: CLI tool to remove artificial line wrapping from Markdown files

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use mdunwrap_core::unwrap_markdown;

#[derive(Parser, Debug)]
#[command(name = "mdunwrap")]
#[command(about = "Remove artificial line wrapping from Markdown files")]
#[command(version)]
#[command(after_help = "Examples:
  mdunwrap < notes.md               # Filter stdin to stdout
  mdunwrap notes.md                 # Print unwrapped file to stdout
  mdunwrap -w notes.md todo.md      # Rewrite files in place
  mdunwrap -w docs/*.md -j4         # Rewrite with 4 parallel jobs")]
struct Cli {
    /// Input Markdown files; reads stdin when none are given
    files: Vec<PathBuf>,

    /// Rewrite files in place instead of printing to stdout
    #[arg(short, long)]
    write: bool,

    /// Number of parallel jobs for --write (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() {
        if cli.write {
            anyhow::bail!("must include filenames with --write");
        }
        return filter_stdin();
    }

    if cli.write {
        rewrite_files(&cli.files, cli.jobs, cli.verbose, cli.quiet)
    } else {
        print_files(&cli.files, cli.verbose)
    }
}

/// Filter a single document from stdin to stdout.
fn filter_stdin() -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;

    io::stdout()
        .write_all(unwrap_markdown(&input).as_bytes())
        .context("Failed to write stdout")?;

    Ok(())
}

/// Print each file's unwrapped contents to stdout, in argument order.
fn print_files(files: &[PathBuf], verbose: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();

    for file in files {
        if verbose {
            eprintln!("Unwrapping: {}", file.display());
        }
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read: {}", file.display()))?;
        stdout
            .write_all(unwrap_markdown(&content).as_bytes())
            .context("Failed to write stdout")?;
    }

    Ok(())
}

/// Truncate and rewrite each file in place, converting in parallel.
fn rewrite_files(files: &[PathBuf], jobs: Option<usize>, verbose: bool, quiet: bool) -> Result<()> {
    // Configure thread pool if jobs specified
    if let Some(n) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let success = AtomicUsize::new(0);

    let errors: Vec<_> = files
        .par_iter()
        .filter_map(|file| match rewrite_file(file) {
            Ok(()) => {
                success.fetch_add(1, Ordering::Relaxed);
                if verbose {
                    eprintln!("Rewrote: {}", file.display());
                }
                None
            }
            Err(e) => Some((file.clone(), e)),
        })
        .collect();

    for (file, e) in &errors {
        eprintln!("Error rewriting {}: {}", file.display(), e);
    }

    if !quiet {
        eprintln!(
            "Rewrote {} files, {} failed",
            success.load(Ordering::Relaxed),
            errors.len()
        );
    }

    if !errors.is_empty() {
        anyhow::bail!("{} files failed to rewrite", errors.len());
    }

    Ok(())
}

/// Inner rewrite for a single file (no printing, for parallel use).
fn rewrite_file(file: &Path) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read: {}", file.display()))?;

    fs::write(file, unwrap_markdown(&content))
        .with_context(|| format!("Failed to write: {}", file.display()))?;

    Ok(())
}
