//! # CLI Interface
//!
//! Argument structure for the `tef` binary, built with `clap` derive.

use clap::{Args, Parser, Subcommand};

use crate::logging::LogFormat;

/// Transaction Extended Format tool.
///
/// Reads plain or extended transactions as hex and decodes, identifies,
/// encodes or strips them. Payloads may be concatenated back to back.
#[derive(Parser, Debug)]
#[command(
    name = "tef",
    about = "Transaction Extended Format tool",
    version,
    propagate_version = true
)]
pub struct TefCli {
    /// Default log filter, e.g. `warn` or `tef_protocol=trace`.
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, global = true, env = "TEF_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode every transaction in a hex stream and print it as JSON.
    Decode(HexInput),
    /// Print the identifier of every transaction in a hex stream.
    Txid(HexInput),
    /// Encode transaction JSON documents into extended-format hex.
    Encode(JsonInput),
    /// Re-encode every transaction in a hex stream in the plain format.
    Strip(HexInput),
}

/// A hex payload, from the command line or stdin.
#[derive(Args, Debug)]
pub struct HexInput {
    /// Hex-encoded payload. Whitespace is ignored. Read from stdin when
    /// omitted.
    pub hex: Option<String>,
}

/// JSON transaction documents, from the command line or stdin.
#[derive(Args, Debug)]
pub struct JsonInput {
    /// One or more `ExtendedTransaction` JSON documents. Read from stdin when
    /// omitted.
    pub json: Option<String>,
}
