use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Default input size limit (10 MiB)
pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "sheetload")]
#[command(version)]
#[command(about = "Read XLSX and CSV uploads into header-keyed records", long_about = None)]
#[command(after_help = "Examples:\n  \
  sheetload clientes.xlsx                    print the first sheet's records as JSON\n  \
  sheetload -f table datos.csv               print records as tab-separated text\n  \
  cat export | sheetload -n export.csv -     read from stdin, parsed as CSV\n  \
  sheetload -r upload.json                   answer a JSON import request")]
pub struct Cli {
    /// Spreadsheet path, HTTP URL, or - for stdin
    #[arg(value_name = "FILE")]
    pub file: String,

    /// File name used to pick the parser (default: FILE's name)
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// FILE holds a JSON import request; print a JSON import response
    #[arg(short = 'r', long = "request")]
    pub request: bool,

    /// Output format for records
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Refuse inputs larger than this many bytes
    #[arg(long = "max-size", value_name = "BYTES", default_value_t = DEFAULT_MAX_SIZE)]
    pub max_size: u64,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Verbose logging (-vv => debug, -vvv => trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of objects
    Json,
    /// Tab-separated header line followed by one line per record
    Table,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.file.starts_with("http://") || self.file.starts_with("https://")
    }

    pub fn is_stdin(&self) -> bool {
        self.file == "-"
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Log level implied by `-q`/`-v`; `RUST_LOG` may still override it
    pub fn log_level(&self) -> LevelFilter {
        if self.is_very_quiet() {
            return LevelFilter::Off;
        }
        if self.is_quiet() {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
