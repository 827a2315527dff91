//! Command-line interface definition using clap.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};

use crate::error::Result;
use crate::format::OutputFormat;

/// Default output file stem when `--output` is not given.
pub const DEFAULT_OUTPUT_STEM: &str = "chat_parsed";

/// Turn a WhatsApp chat export into structured records and conversation
/// statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens _chat.txt
    chatlens _chat.txt -o messages.json
    chatlens _chat.txt --after 2024-01-01 --from Alice -f jsonl
    chatlens _chat.txt --text-only --stats --report report.json")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Path to output file [default: chat_parsed.<format>]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format [default: from output extension, else csv]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this author only (case-insensitive)
    #[arg(long, value_name = "AUTHOR")]
    pub from: Option<String>,

    /// Drop media placeholder messages
    #[arg(long)]
    pub text_only: bool,

    /// Keep messages posted by the built-in assistant
    #[arg(long)]
    pub keep_assistant: bool,

    /// Also write the timestamp text as it appeared in the export
    #[arg(long)]
    pub raw_timestamps: bool,

    /// Print conversation statistics
    #[arg(long)]
    pub stats: bool,

    /// Write the full analysis report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Format to write: `--format`, else the output extension, else CSV.
    pub fn resolved_format(&self) -> Result<OutputFormat> {
        match (self.format, &self.output) {
            (Some(format), _) => Ok(format),
            (None, Some(path)) => OutputFormat::from_path(path),
            (None, None) => Ok(OutputFormat::default()),
        }
    }

    /// Path to write: `--output`, else `chat_parsed.<ext>`.
    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_STEM).with_extension(format.extension()))
    }

    /// Log filter directive for the requested verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "chatlens=warn",
            1 => "chatlens=debug",
            _ => "chatlens=trace",
        }
    }
}
