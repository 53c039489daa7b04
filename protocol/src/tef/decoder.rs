//! Decoding plain or extended payloads into an [`ExtendedTransaction`].

use std::io::{Cursor, Read};

use tracing::debug;

use super::layout::Layout;
use super::sink::{parse, RecordSink};
use crate::config::MAX_PREALLOC_ENTRIES;
use crate::transaction::{ExtendedTransaction, SpentOutput, Transaction};
use crate::wire::{decode_field, CodecError};

/// Collects every record into owned structs.
#[derive(Default)]
struct DecodeSink {
    tx: Transaction,
    spent_outputs: Vec<SpentOutput>,
}

/// Capacity to reserve for a declared record count.
fn prealloc(count: u64) -> usize {
    count.min(MAX_PREALLOC_ENTRIES as u64) as usize
}

impl RecordSink for DecodeSink {
    type Output = (ExtendedTransaction, Layout);

    fn version(&mut self, version: i32) -> Result<(), CodecError> {
        self.tx.version = version;
        Ok(())
    }

    fn input_count(&mut self, count: u64) -> Result<(), CodecError> {
        self.tx.inputs.reserve(prealloc(count));
        Ok(())
    }

    fn input<R: Read>(&mut self, r: &mut R) -> Result<(), CodecError> {
        self.tx.inputs.push(decode_field(r, "input")?);
        Ok(())
    }

    fn spent_output<R: Read>(&mut self, r: &mut R) -> Result<(), CodecError> {
        if self.spent_outputs.capacity() == 0 {
            self.spent_outputs.reserve(self.tx.inputs.capacity());
        }
        self.spent_outputs.push(decode_field(r, "spent output")?);
        Ok(())
    }

    fn output_count(&mut self, count: u64) -> Result<(), CodecError> {
        self.tx.outputs.reserve(prealloc(count));
        Ok(())
    }

    fn output<R: Read>(&mut self, r: &mut R) -> Result<(), CodecError> {
        self.tx.outputs.push(decode_field(r, "output")?);
        Ok(())
    }

    fn lock_time(&mut self, lock_time: u32) -> Result<(), CodecError> {
        self.tx.lock_time = lock_time;
        Ok(())
    }

    fn finish(self, layout: Layout) -> Self::Output {
        // The driver pairs every extended input with exactly one spent
        // output, so the alignment invariant holds by construction.
        let etx = ExtendedTransaction {
            tx: self.tx,
            spent_outputs: self.spent_outputs,
        };
        (etx, layout)
    }
}

/// Decodes one transaction, reporting which layout it used.
pub fn decode_with_layout<R: Read>(r: &mut R) -> Result<(ExtendedTransaction, Layout), CodecError> {
    let (etx, layout) = parse(r, DecodeSink::default())?;
    debug!(
        %layout,
        inputs = etx.tx.inputs.len(),
        outputs = etx.tx.outputs.len(),
        spent_outputs = etx.spent_outputs.len(),
        "decoded transaction"
    );
    Ok((etx, layout))
}

/// Decodes one transaction in either format.
///
/// `spent_outputs` is empty when the payload was plain. The reader is left
/// on the first byte after the transaction, so calling this repeatedly
/// walks a stream of concatenated payloads.
///
/// # Example
///
/// ```
/// use tef_protocol::tef::decode;
///
/// // Version 1, no inputs, no outputs, lock time 0.
/// let bytes = [1u8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
/// let etx = decode(&mut &bytes[..]).unwrap();
/// assert!(etx.tx.inputs.is_empty());
/// assert!(etx.spent_outputs.is_empty());
/// ```
pub fn decode<R: Read>(r: &mut R) -> Result<ExtendedTransaction, CodecError> {
    decode_with_layout(r).map(|(etx, _)| etx)
}

/// Decodes every transaction in a buffer of concatenated payloads.
///
/// An empty buffer yields an empty list. Trailing bytes that do not form a
/// full payload are an error.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<ExtendedTransaction>, CodecError> {
    let mut cursor = Cursor::new(bytes);
    let mut txs = Vec::new();
    while (cursor.position() as usize) < bytes.len() {
        txs.push(decode(&mut cursor)?);
    }
    Ok(txs)
}
