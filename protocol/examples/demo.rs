//! Terminal walkthrough of the TEF codec.
//!
//! Funds a parent transaction, spends it, encodes the spend in the extended
//! format, then reads the bytes back three ways: full decode, streaming
//! identifier, and plain re-encoding. The output uses ANSI escape codes.
//!
//! Run with:
//!   cargo run --example demo --release

use std::time::Instant;

use tef_protocol::config::MARKER;
use tef_protocol::tef;
use tef_protocol::transaction::{
    txin, txout, ExtendedTransaction, OutPoint, ScriptBuf, Transaction, WithAncestors,
};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const BG_BLUE: &str = "\x1b[44m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!("{BG_BLUE}{BOLD}{WHITE}                                                          {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}    TEF  --  Transaction Extended Format Walkthrough      {RESET}");
    println!("{BG_BLUE}{BOLD}{WHITE}                                                          {RESET}");
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]============================================{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!("{CYAN}----------------------------------------------------------{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let us = elapsed.as_secs_f64() * 1_000_000.0;
    println!("{DIM}{MAGENTA}  [{label}: {us:.1} us]{RESET}");
}

fn hex_preview(bytes: &[u8]) -> String {
    let shown = hex::encode(&bytes[..bytes.len().min(24)]);
    if bytes.len() > 24 {
        format!("{shown}... ({} bytes)", bytes.len())
    } else {
        format!("{shown} ({} bytes)", bytes.len())
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    banner();

    // -----------------------------------------------------------------------
    // Step 1: Parent and child
    // -----------------------------------------------------------------------

    section(1, "Build a funding transaction and a spend");

    let mut parent = Transaction::new(1, 0);
    parent
        .outputs
        .push(txout(10_000, vec![0x76, 0xA9, 0x14, 0x88, 0xAC]));

    let mut child = Transaction::new(1, 0);
    let mut input = txin(OutPoint::new(parent.txid(), 0));
    input.script_sig = ScriptBuf::from_bytes(vec![0x48; 72]);
    child.inputs.push(input);
    child.outputs.push(txout(9_990, vec![0x51]));

    info("Parent txid", &parent.txid().to_string());
    info("Child txid", &child.txid().to_string());
    info("Child plain", &hex_preview(&child.to_plain_bytes()));

    // -----------------------------------------------------------------------
    // Step 2: Encode
    // -----------------------------------------------------------------------

    section(2, "Encode the spend with its parent output inline");

    let source = WithAncestors::new(child.clone()).with_ancestor(parent);
    let t = Instant::now();
    let wire = tef::encode_to_vec(&source).expect("parent output resolves");
    timing("encode", t.elapsed());

    info("Extended", &hex_preview(&wire));
    info("Marker", &hex::encode(&wire[4..10]));
    assert_eq!(&wire[4..10], &MARKER);
    success("Marker sits where the plain input count would be");

    // -----------------------------------------------------------------------
    // Step 3: Decode
    // -----------------------------------------------------------------------

    section(3, "Decode and compute the fee");

    let t = Instant::now();
    let (decoded, layout): (ExtendedTransaction, _) =
        tef::decode_with_layout(&mut &wire[..]).expect("well-formed payload");
    timing("decode", t.elapsed());

    info("Layout", layout.name());
    info("Spent value", &decoded.spent_outputs[0].value.to_sat().to_string());
    info("Fee", &format!("{:?}", decoded.fee()));
    info(
        "Fee rate",
        &format!("{:.4} per byte", decoded.fee_rate().unwrap_or_default()),
    );
    assert_eq!(decoded.tx, child);
    success("Decoded transaction matches the original");

    // -----------------------------------------------------------------------
    // Step 4: Identifier without decoding
    // -----------------------------------------------------------------------

    section(4, "Extract the identifier straight from the stream");

    let t = Instant::now();
    let streamed = tef::txid_from_bytes(&wire).expect("well-formed payload");
    timing("streaming txid", t.elapsed());

    info("Streamed txid", &streamed.to_string());
    assert_eq!(streamed, child.txid());
    success("Identical to the hash of the plain serialization");

    // -----------------------------------------------------------------------
    // Step 5: Strip
    // -----------------------------------------------------------------------

    section(5, "Strip back to the plain format");

    let plain = decoded.tx.to_plain_bytes();
    info("Plain", &hex_preview(&plain));
    info(
        "Saved",
        &format!("{} bytes", wire.len() - plain.len()),
    );
    assert_eq!(tef::txid_from_bytes(&plain).expect("plain payload"), streamed);
    success("Both encodings carry the same identifier");
    println!();
}
