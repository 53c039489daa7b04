//! The plain transaction and its canonical serialization.
//!
//! The plain format is what the identifier commits to. The extended format
//! only adds bytes around it (see [`crate::tef`]); it never changes which
//! bytes the identifier covers.

use std::io::{self, Write};

use bitcoin::hashes::Hash;
use serde::{Deserialize, Serialize};

use super::types::{is_coinbase, TxIn, TxOut, Txid};
use crate::wire::{encode_field, write_count, CodecError};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transaction: version, inputs, outputs and lock time.
///
/// # Plain Byte Format
///
/// ```text
/// version i32 LE | varint n | n input records | varint m | m output records | lock_time u32 LE
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// Format version, carried verbatim.
    pub version: i32,
    /// Inputs in spending order.
    pub inputs: Vec<TxIn>,
    /// Outputs in index order.
    pub outputs: Vec<TxOut>,
    /// Lock time, carried verbatim.
    pub lock_time: u32,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl Transaction {
    /// An empty transaction with the given version and lock time.
    pub fn new(version: i32, lock_time: u32) -> Self {
        Self {
            version,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time,
        }
    }

    /// Writes the plain serialization, returning the number of bytes written.
    ///
    /// Records go through `bitcoin` consensus encoding field by field. The
    /// `bitcoin::Transaction` encoder is not used: it switches to the
    /// segregated-witness form for transactions without inputs.
    pub fn encode_plain<W: Write>(&self, w: &mut W) -> Result<usize, CodecError> {
        let mut len = encode_field(w, &self.version, "version")?;
        len += write_count(w, self.inputs.len() as u64, "input count")?;
        for input in &self.inputs {
            len += encode_field(w, input, "input")?;
        }
        len += write_count(w, self.outputs.len() as u64, "output count")?;
        for output in &self.outputs {
            len += encode_field(w, output, "output")?;
        }
        len += encode_field(w, &self.lock_time, "lock time")?;
        Ok(len)
    }

    /// Returns the plain serialization as a new buffer.
    pub fn to_plain_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_plain(&mut buf)
            .expect("plain serialization into a Vec must not fail");
        buf
    }

    /// Length of the plain serialization in bytes.
    pub fn plain_size(&self) -> usize {
        self.encode_plain(&mut io::sink())
            .expect("plain serialization into a sink must not fail")
    }

    /// Computes the identifier: double SHA-256 of the plain serialization.
    ///
    /// Streams into the hash engine; no intermediate buffer is built.
    pub fn txid(&self) -> Txid {
        let mut engine = Txid::engine();
        self.encode_plain(&mut engine)
            .expect("plain serialization into a hash engine must not fail");
        Txid::from_engine(engine)
    }

    /// Returns `true` for a single-input transaction spending the null
    /// reference.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && is_coinbase(&self.inputs[0])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
