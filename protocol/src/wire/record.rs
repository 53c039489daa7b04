//! Field and record plumbing over `bitcoin` consensus encoding.
//!
//! ```text
//! input   = prev_hash[32] | prev_index u32 | varint len | unlocking_script | sequence u32
//! output  = value u64 | varint len | locking_script
//! ```
//!
//! Records decode through the `bitcoin` crate's [`Decodable`] impls for
//! `TxIn`, `TxOut` and `OutPoint`. This module only attaches a field name to
//! whatever goes wrong.
//!
//! A record can also be *forwarded*: consumed from the reader with its exact
//! bytes copied into an `io::Write` sink and no script buffered. The
//! identifier extractor forwards inputs and outputs into the digest and
//! forwards spent outputs into `io::sink()`.

use std::io::{self, Read, Write};

use bitcoin::consensus::encode::{Decodable, Encodable, VarInt};
use bitcoin::OutPoint;

use super::error::{CodecError, FormatError};
use crate::config::MAX_SCRIPT_SIZE;

/// Decodes one `T`, naming `field` in any error.
pub fn decode_field<T: Decodable, R: Read>(r: &mut R, field: &'static str) -> Result<T, CodecError> {
    T::consensus_decode(r).map_err(|e| CodecError::on_decode(field, e))
}

/// Encodes `value`, naming `field` in any error. Returns the bytes written.
pub fn encode_field<T, W>(w: &mut W, value: &T, field: &'static str) -> Result<usize, CodecError>
where
    T: Encodable + ?Sized,
    W: Write,
{
    value
        .consensus_encode(w)
        .map_err(|e| CodecError::on_write(field, e))
}

/// Reads a record count. Non-minimal encodings are rejected.
pub fn read_count<R: Read>(r: &mut R, field: &'static str) -> Result<u64, CodecError> {
    decode_field::<VarInt, _>(r, field).map(|count| count.0)
}

/// Writes a record count in its minimal form.
pub fn write_count<W: Write>(w: &mut W, count: u64, field: &'static str) -> Result<usize, CodecError> {
    encode_field(w, &VarInt(count), field)
}

/// Copies one input record from `r` to `w`.
pub fn forward_input<R: Read, W: Write>(
    r: &mut R,
    w: &mut W,
    field: &'static str,
) -> Result<(), CodecError> {
    let previous_output: OutPoint = decode_field(r, field)?;
    encode_field(w, &previous_output, field)?;
    forward_script(r, w, field)?;
    let sequence: u32 = decode_field(r, field)?;
    encode_field(w, &sequence, field)?;
    Ok(())
}

/// Copies one output record from `r` to `w`.
pub fn forward_output<R: Read, W: Write>(
    r: &mut R,
    w: &mut W,
    field: &'static str,
) -> Result<(), CodecError> {
    let value: u64 = decode_field(r, field)?;
    encode_field(w, &value, field)?;
    forward_script(r, w, field)
}

/// Copies a length-prefixed script without buffering it.
fn forward_script<R: Read, W: Write>(
    r: &mut R,
    w: &mut W,
    field: &'static str,
) -> Result<(), CodecError> {
    let len = read_count(r, field)?;
    if len > MAX_SCRIPT_SIZE as u64 {
        return Err(FormatError::OversizedField {
            field,
            declared: len,
            max: MAX_SCRIPT_SIZE,
        }
        .into());
    }
    write_count(w, len, field)?;

    let copied = io::copy(&mut r.by_ref().take(len), w).map_err(|e| CodecError::on_read(field, e))?;
    if copied < len {
        return Err(FormatError::Truncated { field }.into());
    }
    Ok(())
}
