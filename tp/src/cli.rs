//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::domain::KNOWN_STRATEGIES;

/// Read input from stdin when given as a file path
pub const STDIN_PATH: &str = "-";

/// TaskPanel - terminal client for a task scoring service
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Author tasks, score them with a remote service, and browse ranked results",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Scoring service base URL (overrides config)
    #[arg(long = "base-url", global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a task to a collection and print the merged collection
    Add {
        /// Task title
        #[arg(short, long)]
        title: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long = "due")]
        due_date: Option<String>,

        /// Importance, 1-10 (default 5)
        #[arg(short, long)]
        importance: Option<String>,

        /// Estimated hours (default 1)
        #[arg(long = "hours")]
        estimated_hours: Option<String>,

        /// Comma-separated dependency ids, e.g. "1, 2"
        #[arg(long = "deps")]
        dependencies: Option<String>,

        /// Existing collection file ("-" for stdin); omitted starts empty
        #[arg(short = 'f', long = "collection", value_name = "FILE")]
        collection: Option<PathBuf>,
    },

    /// Score a collection and print the ranked cards
    Analyze {
        /// Strategy name (overrides config)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Collection file ("-" for stdin)
        #[arg(value_name = "FILE", default_value = STDIN_PATH)]
        input: PathBuf,
    },

    /// Ask the service for its top suggestions
    Suggest {
        /// Strategy name (overrides config)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Collection file ("-" for stdin)
        #[arg(value_name = "FILE", default_value = STDIN_PATH)]
        input: PathBuf,
    },

    /// List known strategy presets
    Strategies,
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskpanel")
        .join("logs")
        .join("taskpanel.log")
}

/// Generate the after_help text with strategies and log location
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let mut help = String::new();

    help.push_str("Strategies:\n");
    for (name, label) in KNOWN_STRATEGIES {
        help.push_str(&format!("  {:<16} {}\n", name, label));
    }

    help.push('\n');
    help.push_str("Run without a subcommand to open the interactive panel.\n");
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}

/// Output format for analyze/suggest
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
