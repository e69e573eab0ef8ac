//! Command-line interface definitions for CNN Headlines.
//!
//! All options can be provided via command-line flags or `HEADLINES_*`
//! environment variables.

use crate::categories::{Category, SportsSubcategory};
use crate::outputs::OutputFormat;
use crate::scrapers::fetch::DEFAULT_TIMEOUT;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the CNN Headlines application.
///
/// # Examples
///
/// ```sh
/// # Top five headlines from the front page, saved to headlines.json
/// cnn_headlines
///
/// # Golf headlines mentioning "open" or "masters"
/// cnn_headlines -c sports -s golf -k open masters
///
/// # Business headlines saved as CSV
/// cnn_headlines -c business -f csv -o business.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch and display news headlines.")]
pub struct Cli {
    /// Number of headlines to display
    #[arg(short, long, env = "HEADLINES_LIMIT", default_value_t = 5)]
    pub limit: usize,

    /// Output filename
    #[arg(short, long, env = "HEADLINES_OUTPUT", default_value = "headlines.json")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, env = "HEADLINES_FORMAT", default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Keywords to filter headlines
    #[arg(short, long, num_args = 0..)]
    pub keywords: Vec<String>,

    /// Category to fetch headlines from CNN
    #[arg(short, long, value_enum, env = "HEADLINES_CATEGORY", default_value_t = Category::General)]
    pub category: Category,

    /// Subcategory under sports to fetch headlines from CNN
    #[arg(short, long, value_enum)]
    pub subcategory: Option<SportsSubcategory>,

    /// Show supported websites and exit
    #[arg(short = 'w', long)]
    pub supported_websites: bool,

    /// Set the logging level (RUST_LOG takes precedence when set)
    #[arg(short = 'v', long, value_enum, ignore_case = true, env = "HEADLINES_LOGLEVEL", default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,

    /// Request timeout in seconds
    #[arg(short, long, env = "HEADLINES_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// User-Agent header sent with the request
    #[arg(long, env = "HEADLINES_USER_AGENT")]
    pub user_agent: Option<String>,

    /// YAML file with an ordered site-profile table replacing the built-in one
    #[arg(long, env = "HEADLINES_SITES")]
    pub sites: Option<PathBuf>,
}

/// Log verbosity accepted by `--loglevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// `EnvFilter` directive for this level. `tracing` stops at `error`, so
    /// `CRITICAL` shares it.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}
