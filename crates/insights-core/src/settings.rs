use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::DEFAULT_TOP_N;
use crate::reading_time::DEFAULT_WORDS_PER_MINUTE;

/// Content type alias counted when `--content-type` is not given.
pub const DEFAULT_CONTENT_TYPE: &str = "article";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Reading-time estimates and recent-article stats for exported CMS content
#[derive(Parser, Debug, Clone)]
#[command(
    name = "article-insights",
    about = "Reading-time estimates and recent-article stats for exported CMS content",
    version
)]
pub struct Settings {
    #[command(subcommand)]
    pub command: Command,

    /// Reading speed in words per minute
    #[arg(long, default_value_t = i64::from(DEFAULT_WORDS_PER_MINUTE), allow_negative_numbers = true)]
    pub words_per_minute: i64,

    /// Number of recent articles to list
    #[arg(long, default_value_t = DEFAULT_TOP_N as i64, allow_negative_numbers = true)]
    pub top_n: i64,

    /// Content type alias to count as an article
    #[arg(long, default_value = DEFAULT_CONTENT_TYPE)]
    pub content_type: String,

    /// Directory or JSON file holding the exported content tree
    #[arg(long)]
    pub content_path: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "json", value_parser = ["json", "text"])]
    pub format: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// What to compute.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Estimate the reading time of a text or HTML file (stdin when omitted)
    Estimate {
        /// File to read
        file: Option<PathBuf>,
    },
    /// Count articles and list the most recent ones
    Rank,
    /// Like `rank`, with a reading time for each listed article
    Stats,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Parse `args` and apply the `--debug` override.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(args).apply_debug_flag()
    }

    /// `--debug` overrides the log level.
    fn apply_debug_flag(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }

    /// Whether output should be rendered as human-readable text.
    pub fn is_text_output(&self) -> bool {
        self.format == "text"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
