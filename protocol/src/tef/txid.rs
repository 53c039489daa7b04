//! Identifier extraction straight from the wire.
//!
//! The identifier is `sha256d` of the plain serialization. For a plain
//! payload that is every byte read; for an extended payload it is every byte
//! except the marker and the spent-output records. `DigestSink` rides the
//! same [`parse`] driver as the decoder and feeds the digest as it goes, so
//! neither format is materialized.

use std::io::{self, Cursor, Read};

use bitcoin::hashes::{Hash, HashEngine};
use tracing::debug;

use super::layout::Layout;
use super::sink::{parse, RecordSink};
use crate::transaction::Txid;
use crate::wire::record::{forward_input, forward_output};
use crate::wire::{encode_field, write_count, CodecError};

/// Hashes the plain-format view of a payload.
struct DigestSink {
    engine: <Txid as Hash>::Engine,
}

impl DigestSink {
    fn new() -> Self {
        Self {
            engine: Txid::engine(),
        }
    }
}

impl RecordSink for DigestSink {
    type Output = (Txid, Layout);

    fn version(&mut self, version: i32) -> Result<(), CodecError> {
        encode_field(&mut self.engine, &version, "version")?;
        Ok(())
    }

    fn input_count(&mut self, count: u64) -> Result<(), CodecError> {
        write_count(&mut self.engine, count, "input count")?;
        Ok(())
    }

    fn input<R: Read>(&mut self, r: &mut R) -> Result<(), CodecError> {
        forward_input(r, &mut self.engine, "input")
    }

    fn spent_output<R: Read>(&mut self, r: &mut R) -> Result<(), CodecError> {
        forward_output(r, &mut io::sink(), "spent output")
    }

    fn output_count(&mut self, count: u64) -> Result<(), CodecError> {
        write_count(&mut self.engine, count, "output count")?;
        Ok(())
    }

    fn output<R: Read>(&mut self, r: &mut R) -> Result<(), CodecError> {
        forward_output(r, &mut self.engine, "output")
    }

    fn lock_time(&mut self, lock_time: u32) -> Result<(), CodecError> {
        encode_field(&mut self.engine, &lock_time, "lock time")?;
        Ok(())
    }

    fn finish(self, layout: Layout) -> Self::Output {
        let hashed = self.engine.n_bytes_hashed();
        let txid = Txid::from_engine(self.engine);
        debug!(%txid, %layout, hashed, "extracted transaction identifier");
        (txid, layout)
    }
}

/// Reads one payload and returns its identifier and layout.
///
/// Consumes exactly the bytes [`decode`](super::decode) would.
pub fn txid_with_layout<R: Read>(r: &mut R) -> Result<(Txid, Layout), CodecError> {
    parse(r, DigestSink::new())
}

/// Reads one payload in either format and returns its identifier.
///
/// # Example
///
/// ```
/// use tef_protocol::tef::txid_from_reader;
/// use tef_protocol::transaction::Transaction;
///
/// let tx = Transaction::new(2, 12_345);
/// let bytes = tx.to_plain_bytes();
/// assert_eq!(txid_from_reader(&mut &bytes[..]).unwrap(), tx.txid());
/// ```
pub fn txid_from_reader<R: Read>(r: &mut R) -> Result<Txid, CodecError> {
    txid_with_layout(r).map(|(txid, _)| txid)
}

/// Identifier of the first payload in `bytes`. Trailing bytes are ignored.
pub fn txid_from_bytes(bytes: &[u8]) -> Result<Txid, CodecError> {
    txid_from_reader(&mut Cursor::new(bytes))
}

/// Identifiers of every payload in a buffer of concatenated payloads.
pub fn txids_all(bytes: &[u8]) -> Result<Vec<Txid>, CodecError> {
    let mut cursor = Cursor::new(bytes);
    let mut txids = Vec::new();
    while (cursor.position() as usize) < bytes.len() {
        txids.push(txid_from_reader(&mut cursor)?);
    }
    Ok(txids)
}
