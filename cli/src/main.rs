// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # TEF Command-Line Tool
//!
//! Entry point for the `tef` binary. Parses arguments, initializes logging
//! and runs one subcommand:
//!
//! - `decode` - decode a hex stream into JSON
//! - `txid`   - print identifiers without materializing transactions
//! - `encode` - turn transaction JSON into extended-format hex
//! - `strip`  - re-encode a hex stream in the plain format

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Commands, TefCli};

fn main() -> Result<()> {
    let cli = TefCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    let lines = match cli.command {
        Commands::Decode(args) => commands::decode(&commands::read_input(args.hex)?)?,
        Commands::Txid(args) => commands::txid(&commands::read_input(args.hex)?)?,
        Commands::Encode(args) => commands::encode(&commands::read_input(args.json)?)?,
        Commands::Strip(args) => commands::strip(&commands::read_input(args.hex)?)?,
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}
