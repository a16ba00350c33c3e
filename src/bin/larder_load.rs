//! larder-load: normalize recipe dumps into one SQLite database
//!
//! Usage:
//!   # Load every built-in source from ./data into ./recipes.db
//!   larder-load
//!
//!   # Load a subset into a specific database
//!   larder-load --db /tmp/recipes.db --data-dir ./dumps allrecipes cookstr
//!
//!   # Machine-readable per-source reports
//!   larder-load --json

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use larder::load::{load_all, schema, LoadConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "larder-load")]
#[command(about = "Load line-delimited recipe dumps into a relational SQLite database", long_about = None)]
struct Args {
    /// Source names to load (default: all built-in sources)
    #[arg(value_name = "SOURCE")]
    sources: Vec<String>,

    /// SQLite database file, created if absent, appended to otherwise
    #[arg(long, default_value = "recipes.db")]
    db: PathBuf,

    /// Directory containing the per-source .json files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Print the final per-source reports as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log per-record failure details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Resolve configuration once, up front; unknown names fail before any I/O
    let config = if args.sources.is_empty() {
        LoadConfig::all(args.data_dir.clone())
    } else {
        LoadConfig::select(args.data_dir.clone(), &args.sources)?
    };

    let mut conn = schema::open(&args.db)?;
    let reports = load_all(&mut conn, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
