use crate::config::{DecodeDirection, OutputFormat};
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Log verbosity selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "debug-marshal",
    version,
    about = "Encode, decode and validate debugger protocol lines",
    long_about = None
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file
    #[arg(long, global = true, env = "DEBUG_MARSHAL_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            return Verbosity::Quiet;
        }
        match self.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode and validate wire lines, printing the typed messages
    Decode(DecodeArgs),

    /// Encode JSON messages into canonical wire lines
    Encode(EncodeArgs),

    /// Print an asynchronous notification stamped with a run request id
    Notify(NotifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Side of the protocol the lines come from
    #[arg(short, long, value_enum)]
    pub direction: Option<DecodeDirection>,

    /// Read lines from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Report malformed lines and keep decoding
    #[arg(short, long)]
    pub keep_going: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Read JSON lines from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Id of the run request the notification belongs to
    #[arg(long, default_value_t = 0)]
    pub run_id: u64,

    #[command(subcommand)]
    pub kind: NotifyKind,
}

#[derive(Subcommand, Debug)]
pub enum NotifyKind {
    /// Execution paused at a source location
    Stopped {
        file_path: String,
        #[arg(allow_negative_numbers = true)]
        line: i64,
        #[arg(allow_negative_numbers = true)]
        column: i64,
    },
    /// Execution finished
    Finish,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}
