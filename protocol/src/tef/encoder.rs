//! Encoding into the extended format.

use std::io::Write;

use tracing::debug;

use crate::config::MARKER;
use crate::transaction::{coinbase_spent_output, is_coinbase, TransactionWithOutputs};
use crate::wire::{encode_field, write_count, CodecError};

/// Writes `source` in the extended format and returns the byte count.
///
/// Every spent output is resolved before the first byte is written: if any
/// non-coinbase input cannot be resolved the call fails with
/// [`CodecError::MissingSpentOutput`] and `w` is untouched. A flat
/// spent-output list whose length is neither zero nor the input count fails
/// with [`CodecError::MisalignedSpentOutputs`], also before any write.
///
/// A transaction without inputs has no marker and no spent outputs, so its
/// output is byte-identical to the plain serialization.
pub fn encode<W, T>(w: &mut W, source: &T) -> Result<usize, CodecError>
where
    W: Write,
    T: TransactionWithOutputs + ?Sized,
{
    let tx = source.transaction();
    if let Some(spent_outputs) = source.spent_output_count() {
        if spent_outputs != 0 && spent_outputs != tx.inputs.len() {
            return Err(CodecError::MisalignedSpentOutputs {
                inputs: tx.inputs.len(),
                spent_outputs,
            });
        }
    }

    let coinbase_spent = coinbase_spent_output();
    let mut spent = Vec::with_capacity(tx.inputs.len());
    for (input_index, input) in tx.inputs.iter().enumerate() {
        let output = if is_coinbase(input) {
            &coinbase_spent
        } else {
            source
                .spent_output(input_index)
                .ok_or(CodecError::MissingSpentOutput {
                    input_index,
                    outpoint: input.previous_output,
                })?
        };
        spent.push(output);
    }

    let mut len = encode_field(w, &tx.version, "version")?;
    if !tx.inputs.is_empty() {
        w.write_all(&MARKER)
            .map_err(|e| CodecError::on_write("marker", e))?;
        len += MARKER.len();
    }
    len += write_count(w, tx.inputs.len() as u64, "input count")?;
    for (input, output) in tx.inputs.iter().zip(&spent) {
        len += encode_field(w, input, "input")?;
        len += encode_field(w, *output, "spent output")?;
    }
    len += write_count(w, tx.outputs.len() as u64, "output count")?;
    for output in &tx.outputs {
        len += encode_field(w, output, "output")?;
    }
    len += encode_field(w, &tx.lock_time, "lock time")?;

    debug!(
        inputs = tx.inputs.len(),
        outputs = tx.outputs.len(),
        bytes = len,
        "encoded extended transaction"
    );
    Ok(len)
}

/// [`encode`] into a fresh buffer.
pub fn encode_to_vec<T: TransactionWithOutputs + ?Sized>(source: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    encode(&mut buf, source)?;
    Ok(buf)
}
