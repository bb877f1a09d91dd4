use clap::{Parser, ValueEnum};
use helix_maps::config::{ConfigDocument, ConfigLoader};
use helix_maps::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Output format for the loaded configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `Maps(key=value, ...)` rendering
    Repr,
    /// Pretty-printed JSON, keys in file order
    Json,
    /// The document as read, before coercion
    Ini,
}

// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "helix-maps",
    version,
    about = "Inspect Helix configuration as typed, dot-addressable values.",
    long_about = "Loads a Helix INI (or TOML) configuration file, substitutes &VAR& environment references, coerces option strings into numbers, booleans and collections, and prints the result."
)]
struct Args {
    /// Configuration file to load instead of the standard locations.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print only the value at this dotted path (e.g. `paths.datasets`).
    #[arg(short, long)]
    get: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Repr)]
    format: Format,

    /// Log filter (e.g. `debug`), overriding RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };
    tracing::debug!(path = ?loader.config_path, "configuration loaded");

    if args.format == Format::Ini {
        if args.get.is_some() {
            return Err("--get cannot be combined with --format ini".into());
        }
        return match &loader.document {
            ConfigDocument::Ini(doc) => Ok(doc.to_string()),
            ConfigDocument::Toml(table) => Ok(toml::to_string_pretty(table)?),
        };
    }

    let settings = loader.settings()?;
    let value = match &args.get {
        Some(path) => settings
            .lookup(path)
            .ok_or_else(|| format!("no value at '{path}'"))?,
        None => Value::Node(settings),
    };

    match args.format {
        Format::Json => Ok(serde_json::to_string_pretty(&value)?),
        _ => Ok(value.to_string()),
    }
}
