//! QRS Manifest - course materials indexer
//!
//! Walks a tree of course folders (past papers, solutions, revision notes,
//! problem sheets, lecture notes, practice sets), classifies every file by
//! its name and writes one JSON manifest for the catalog page to render.

mod catalog;
mod config;
mod constants;
mod error;
mod filename;
mod folder;
mod generator;
mod links;
mod loader;
mod models;
mod names;
mod scanner;
mod writer;

use clap::{Args, Parser, Subcommand};
use config::Config;
use error::Result;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrs-manifest")]
#[command(about = "Index course materials into a JSON manifest")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration file (defaults to ./qrs-manifest.toml when present)
    #[arg(short, long, global = true, env = "QRS_MANIFEST_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the courses directory and write the manifest (default)
    Generate(GenerateArgs),

    /// Print courses from an existing manifest
    List {
        /// Case-insensitive filter on course code or title
        query: Option<String>,

        /// Manifest to read (defaults to the configured output)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Courses directory to scan
    #[arg(long)]
    root: Option<PathBuf>,

    /// Where to write the manifest
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Course name table (.json, .toml, .yaml)
    #[arg(long)]
    names: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "qrs_manifest=debug"
    } else {
        "qrs_manifest=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(mut config: Config, args: GenerateArgs) -> Result<()> {
    if let Some(root) = args.root {
        config.scan.root = root;
    }
    if let Some(output) = args.output {
        config.scan.output = output;
    }
    if let Some(names) = args.names {
        config.names.file = Some(names);
    }

    let resolver = config.name_resolver()?;
    info!("Loaded {} course names", resolver.len());

    let links = config.link_builder();
    let scanner = scanner::Scanner::new(&resolver, &links);

    info!("Scanning {}", config.scan.root.display());
    let manifest = generator::generate(&scanner, &config.scan.root);
    writer::write_manifest(&manifest, &config.scan.output)?;

    println!(
        "✓ Generated {}: {}",
        config.scan.output.display(),
        catalog::ManifestSummary::from(&manifest)
    );
    Ok(())
}

fn list(config: &Config, query: Option<&str>, manifest_path: Option<&Path>) -> Result<()> {
    let path = manifest_path.unwrap_or(config.scan.output.as_path());
    let manifest = loader::load_manifest(path)?;
    let courses = catalog::filter_courses(&manifest, query.unwrap_or(""));

    if courses.is_empty() {
        println!("No courses match.");
        return Ok(());
    }

    for course in courses {
        println!("{}", catalog::render_course(course)?);
    }
    println!("Generated at {}", manifest.generated_at.to_rfc3339());
    Ok(())
}

/// Entry point.
///
/// 1. Loads configuration (file, then CLI overrides)
/// 2. Scans the courses tree and classifies every file
/// 3. Writes the manifest in one whole-file replacement
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::discover(
        cli.config.as_deref(),
        Path::new(constants::DEFAULT_CONFIG_FILE),
    )?;

    match cli.command {
        Some(Command::List { query, manifest }) => {
            list(&config, query.as_deref(), manifest.as_deref())
        }
        Some(Command::Generate(args)) => generate(config, args),
        None => generate(config, GenerateArgs::default()),
    }
}
