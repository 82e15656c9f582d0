//! Main entry point for the sheetload CLI application.
//!
//! Loads a spreadsheet from a local path, an HTTP URL or stdin, parses it
//! and prints the resulting records.

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use std::path::Path;
use tokio::io::AsyncWriteExt;

use sheetload::{
    Cli, Error, HttpSource, ImportRequest, ImportResponse, LocalFileSource, OutputFormat, Record,
    Source, StdinSource, parse_spreadsheet,
};

/// Application entry point.
///
/// Parses command-line arguments, sets up logging and dispatches on the
/// kind of input.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if cli.is_http_url() {
        let source = HttpSource::new(&cli.file)?;
        process_source(&source, &cli).await?;

        // Display network transfer statistics for HTTP sources
        if !cli.is_quiet() {
            eprintln!("Total bytes transferred: {}", format_size(source.transferred_bytes()));
        }
    } else if cli.is_stdin() {
        process_source(&StdinSource, &cli).await?;
    } else {
        let source = LocalFileSource::new(Path::new(&cli.file))?;
        process_source(&source, &cli).await?;
    }

    Ok(())
}

/// Load the source and either parse it or answer it as an import request.
async fn process_source<S: Source>(source: &S, cli: &Cli) -> Result<()> {
    let bytes = source.read_all(cli.max_size).await?;
    info!("read {} from {}", format_size(bytes.len() as u64), cli.file);

    if cli.request {
        return answer_request(bytes).await;
    }

    let file_name = cli
        .name
        .clone()
        .unwrap_or_else(|| source.file_name().to_string());
    if file_name.is_empty() {
        bail!("cannot tell the file type of {}, pass --name", cli.file);
    }

    // Parsing is CPU-bound; keep it off the async workers
    let name = file_name.clone();
    let records = tokio::task::spawn_blocking(move || parse_spreadsheet(&bytes, &name))
        .await?
        .with_context(|| format!("failed to parse {}", file_name))?;
    if records.is_empty() {
        return Err(Error::EmptyInput).with_context(|| format!("failed to parse {}", file_name));
    }

    write_records(&records, cli.format).await?;

    if !cli.is_quiet() {
        eprintln!("{} records from {}", records.len(), file_name);
    }

    Ok(())
}

/// Parse a JSON import request and print the JSON response.
///
/// A failed import is still answered on stdout; the exit status reports it.
async fn answer_request(bytes: Vec<u8>) -> Result<()> {
    let request: ImportRequest =
        serde_json::from_slice(&bytes).context("input is not a JSON import request")?;

    let result = tokio::task::spawn_blocking(move || request.process()).await?;
    let response = ImportResponse::from(result);

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(serde_json::to_string_pretty(&response)?.as_bytes())
        .await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

/// Write records to stdout in the requested format.
///
/// The table format takes its columns from the first record; every record
/// of one parse shares the same keys.
async fn write_records(records: &[Record], format: OutputFormat) -> Result<()> {
    let out = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(records)?;
            json.push('\n');
            json
        }
        OutputFormat::Table => {
            let mut table = String::new();
            if let Some(first) = records.first() {
                let header: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
                table.push_str(&header.join("\t"));
                table.push('\n');
            }
            for record in records {
                let values: Vec<&str> = record.values().map(|v| v.as_str()).collect();
                table.push_str(&values.join("\t"));
                table.push('\n');
            }
            table
        }
    };

    let mut stdout = tokio::io::stdout();
    stdout.write_all(out.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Format a byte size into a human-readable string.
///
/// Automatically selects the appropriate unit (bytes, KB, MB, GB)
/// based on the size magnitude.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// assert_eq!(format_size(1048576), "1.00 MB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
