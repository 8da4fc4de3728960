use anyhow::{Context, Result};
use clap::Parser;
use ise_importer::{convert, preview, CommaHandling, ConvertOptions, ImportError, OUTPUT_FILE_NAME};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Convert a MAC address spreadsheet into a Cisco ISE endpoint import CSV.
///
/// Columns are read by position: A = MAC address, B = ISE MAC group,
/// C = description, D = location. The first row is treated as data.
#[derive(Parser, Debug)]
#[clap(name = "ise-importer", version)]
struct Cli {
    /// Spreadsheet to convert (.xlsx or .xls)
    input: PathBuf,

    /// Where to write the CSV
    #[clap(short, long, default_value = OUTPUT_FILE_NAME)]
    output: PathBuf,

    /// Write the CSV to stdout instead of a file
    #[clap(long, conflicts_with = "output")]
    stdout: bool,

    /// Leave the description column empty
    #[clap(long)]
    no_description: bool,

    /// How commas inside cells are handled
    #[clap(long, value_enum, default_value_t = CommaHandling::Escape)]
    comma_handling: CommaHandling,

    /// Print the header and the first N data lines
    #[clap(long, num_args = 0..=1, default_missing_value = "20")]
    preview: Option<usize>,

    /// Print a JSON summary of the run
    #[clap(long, conflicts_with = "stdout")]
    json: bool,

    /// trace, debug, info, warn or error
    #[clap(long)]
    log_level: Option<String>,
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let content =
        fs::read(&cli.input).with_context(|| format!("cannot read {}", cli.input.display()))?;
    let filename = cli.input.to_string_lossy();

    let options = ConvertOptions {
        include_description: !cli.no_description,
        comma_handling: cli.comma_handling,
        ..ConvertOptions::default()
    };

    let report = convert(&content, &filename, &options)?;

    if let Some(notice) = &report.comma_notice {
        eprintln!("{}", notice);
    }
    for warning in &report.warnings {
        eprintln!("warning: {}", warning);
    }

    if let Some(rows) = cli.preview {
        eprintln!("{}", preview(&report.csv, rows));
    }

    if cli.stdout {
        std::io::stdout().write_all(report.csv.as_bytes())?;
    } else {
        fs::write(&cli.output, &report.csv)
            .with_context(|| format!("cannot write {}", cli.output.display()))?;
        info!(path = %cli.output.display(), rows = report.row_count, "CSV written");
    }

    if cli.json {
        let mut summary = serde_json::to_value(&report)?;
        summary["output"] = serde_json::Value::String(cli.output.display().to_string());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if let Err(err) = run(&cli) {
        match err.downcast_ref::<ImportError>() {
            Some(import_err) if import_err.is_input_error() => eprintln!("error: {}", import_err),
            _ => eprintln!("unexpected error: {:#}", err),
        }
        std::process::exit(1);
    }
}
