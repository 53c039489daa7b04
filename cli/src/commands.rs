//! # Subcommand Implementations
//!
//! Each command takes its input as text and returns the lines to print.
//! `main.rs` owns stdin and stdout; nothing here touches them.

use std::io::{Cursor, Read};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use tef_protocol::tef;
use tef_protocol::transaction::{ExtendedTransaction, SpentOutput, TxIn, TxOut, Txid};

/// Uses the positional argument if present, stdin otherwise.
pub fn read_input(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Parses hex, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    let digits = compact.strip_prefix("0x").unwrap_or(&compact);
    if digits.is_empty() {
        bail!("no input");
    }
    hex::decode(digits).context("input is not valid hex")
}

/// One decoded transaction, as printed by `tef decode`.
#[derive(Debug, Serialize)]
pub struct DecodeReport {
    pub txid: Txid,
    pub layout: &'static str,
    /// Bytes the payload occupied in the stream.
    pub size: usize,
    pub plain_size: usize,
    pub version: i32,
    pub lock_time: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spent_outputs: Vec<SpentOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<f64>,
}

impl DecodeReport {
    fn new(etx: ExtendedTransaction, layout: tef::Layout, size: usize) -> Self {
        let txid = etx.txid();
        let plain_size = etx.tx.plain_size();
        let fee = etx.fee();
        let fee_rate = etx.fee_rate();
        Self {
            txid,
            layout: layout.name(),
            size,
            plain_size,
            version: etx.tx.version,
            lock_time: etx.tx.lock_time,
            inputs: etx.tx.inputs,
            outputs: etx.tx.outputs,
            spent_outputs: etx.spent_outputs,
            fee,
            fee_rate,
        }
    }
}

/// Decodes every payload in `bytes`.
pub fn decode_reports(bytes: &[u8]) -> Result<Vec<DecodeReport>> {
    let mut cursor = Cursor::new(bytes);
    let mut reports = Vec::new();
    while (cursor.position() as usize) < bytes.len() {
        let start = cursor.position();
        let (etx, layout) = tef::decode_with_layout(&mut cursor)
            .with_context(|| format!("failed to decode transaction at offset {start}"))?;
        let size = (cursor.position() - start) as usize;
        reports.push(DecodeReport::new(etx, layout, size));
    }
    tracing::info!(count = reports.len(), "decoded stream");
    Ok(reports)
}

/// `tef decode`: one pretty JSON document per transaction.
pub fn decode(input: &str) -> Result<Vec<String>> {
    let bytes = parse_hex(input)?;
    decode_reports(&bytes)?
        .iter()
        .map(|report| serde_json::to_string_pretty(report).context("failed to render JSON"))
        .collect()
}

/// `tef txid`: one identifier per transaction.
pub fn txid(input: &str) -> Result<Vec<String>> {
    let bytes = parse_hex(input)?;
    let txids = tef::txids_all(&bytes).context("failed to read transaction stream")?;
    tracing::info!(count = txids.len(), "identified stream");
    Ok(txids.iter().map(Txid::to_string).collect())
}

/// `tef encode`: one extended-format hex line per JSON document.
pub fn encode(input: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for (index, document) in serde_json::Deserializer::from_str(input)
        .into_iter::<ExtendedTransaction>()
        .enumerate()
    {
        let parsed = document.with_context(|| format!("invalid transaction JSON #{index}"))?;
        let etx = ExtendedTransaction::new(parsed.tx, parsed.spent_outputs)
            .with_context(|| format!("transaction #{index} is inconsistent"))?;
        let wire = tef::encode_to_vec(&etx)
            .with_context(|| format!("failed to encode transaction #{index}"))?;
        lines.push(hex::encode(wire));
    }
    if lines.is_empty() {
        bail!("no transaction JSON given");
    }
    Ok(lines)
}

/// `tef strip`: one plain-format hex line per transaction.
pub fn strip(input: &str) -> Result<Vec<String>> {
    let bytes = parse_hex(input)?;
    let txs = tef::decode_all(&bytes).context("failed to decode transaction stream")?;
    Ok(txs
        .iter()
        .map(|etx| hex::encode(etx.tx.to_plain_bytes()))
        .collect())
}
