//! larder-inspect: ad hoc schema discovery over raw recipe dumps
//!
//! Usage:
//!   # Which top-level keys does a dump carry?
//!   larder-inspect keys data/cookstr-recipes.json
//!
//!   # What distinct values live under one key?
//!   larder-inspect unique data/cookstr-recipes.json cuisine
//!
//!   # Dump every value of a key, one per line
//!   larder-inspect values data/cookstr-recipes.json title

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use larder::inspect;
use larder::load::JsonLines;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "larder-inspect")]
#[command(about = "Inspect raw line-delimited recipe dumps", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the distinct top-level keys, in first-seen order
    Keys {
        /// Line-delimited JSON file
        file: PathBuf,
    },

    /// List the distinct values of one key, in first-seen order
    Unique {
        /// Line-delimited JSON file
        file: PathBuf,
        /// Top-level key to inspect
        key: String,
    },

    /// Dump every value of one key, newlines flattened to a marker
    Values {
        /// Line-delimited JSON file
        file: PathBuf,
        /// Top-level key to inspect
        key: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Keys { file } => run(&file, |records| {
            for key in inspect::distinct_keys(records) {
                println!("{key}");
            }
        }),
        Command::Unique { file, key } => run(&file, |records| {
            for value in inspect::unique_values(&key, records) {
                println!("{value}");
            }
        }),
        Command::Values { file, key } => run(&file, |records| {
            for value in inspect::values(&key, records) {
                println!("{value}");
            }
        }),
    }
}

/// Stream the file's parsed records through `body`, skipping malformed lines
/// and reporting how many were skipped.
fn run<F>(file: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut dyn Iterator<Item = Value>),
{
    let mut skipped = 0usize;
    let mut records = JsonLines::open(file)?.filter_map(|record| match record {
        Ok(value) => Some(value),
        Err(_) => {
            skipped += 1;
            None
        }
    });

    body(&mut records);
    drop(records);

    if skipped > 0 {
        eprintln!("Skipped {skipped} malformed lines");
    }
    Ok(())
}
