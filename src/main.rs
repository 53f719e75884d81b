use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bibconvert::{Dialect, MappingConfig, RisReader, bibtex, csv, transform};

#[derive(Parser)]
#[command(
    name = "bibconvert",
    about = "Convert a bibliographic export file to BibTeX",
    version
)]
struct Cli {
    /// Format of the input file
    #[arg(value_parser = ["ieee", "scopus", "pubmed"])]
    format: String,

    /// Path to the source file
    file: PathBuf,

    /// Path to the BibTeX output file
    bibfile: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if !cli.file.exists() {
        eprintln!("Source file does not exist.");
        std::process::exit(1);
    }

    // The clap value parser constrains format to the known dialect names.
    let dialect = Dialect::from_str(&cli.format)?;

    let config = MappingConfig::load_default().context("failed to load mapping definitions")?;

    let input = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let entries = if dialect.is_csv() {
        let rows = csv::read_rows(&input)
            .with_context(|| format!("failed to parse {}", cli.file.display()))?;
        debug!(rows = rows.len(), %dialect, "read CSV rows");
        transform(dialect, &config, rows)?
    } else {
        let reader = RisReader::new(&input);
        transform(dialect, &config, reader.records())?
    };
    info!(entries = entries.len(), %dialect, "transformed records");

    let mut output = fs::File::create(&cli.bibfile)
        .with_context(|| format!("failed to create {}", cli.bibfile.display()))?;
    bibtex::write_bibliography(&mut output, &entries)?;

    Ok(())
}
