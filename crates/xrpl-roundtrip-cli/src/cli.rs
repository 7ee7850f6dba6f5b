//! Command-line surface.

use clap::{ArgGroup, CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xrpl-roundtrip", version)]
#[command(about = "Convert HEX <-> JSON ledger records and verify the round trip is lossless")]
#[command(after_help = "Run without --data, --file or --batch to use the interactive menu.")]
#[command(group(ArgGroup::new("mode").args(["data", "file", "batch"])))]
pub struct Cli {
    /// Process one inline HEX or JSON record, then exit
    #[arg(long, value_name = "STRING")]
    pub data: Option<String>,
    /// Process the contents of a file as one record, then exit
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Process every file in a directory as an independent record
    #[arg(long, value_name = "DIR")]
    pub batch: Option<PathBuf>,
    /// Codec program invoked as `PROGRAM [ARGS..] encode|decode`
    #[arg(long, value_name = "PROGRAM", env = "XRPL_ROUNDTRIP_CODEC")]
    pub codec: Option<PathBuf>,
    /// Extra argument passed to the codec program before the verb (repeatable)
    #[arg(long = "codec-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub codec_args: Vec<String>,
    /// definitions.json used to look up field types (default: built-in UInt64 fields)
    #[arg(long, value_name = "PATH", env = "XRPL_ROUNDTRIP_DEFINITIONS")]
    pub definitions: Option<PathBuf>,
    /// Directory where saved outputs are written
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
    /// Save every successful conversion under NAME without prompting
    #[arg(long, value_name = "NAME", conflicts_with = "no_save")]
    pub output: Option<String>,
    /// Never offer to save outputs
    #[arg(long)]
    pub no_save: bool,
    /// Delay before printing each verification result, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub pace_ms: u64,
    /// Exit with an error code if any record fails to convert or verify
    #[arg(long)]
    pub strict: bool,
}

/// Rendered `--help` text, also shown from the interactive menu.
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}
