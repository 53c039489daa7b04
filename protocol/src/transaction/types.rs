//! Value types carried inside a transaction.
//!
//! Identifiers, previous-output references and the input and output records
//! are the `bitcoin` crate's types. Their consensus encoding is exactly the
//! record layout both formats use, and `Txid` already displays in the
//! conventional reversed-hex form. What lives here is the handful of
//! constructors and predicates the codec needs on top.

use bitcoin::hashes::Hash;
pub use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, TxIn, TxOut, Txid, Witness};

/// An output as it appears next to the input that spends it.
pub type SpentOutput = TxOut;

/// An input spending `previous_output` with an empty unlocking script and a
/// final sequence number.
pub fn txin(previous_output: OutPoint) -> TxIn {
    TxIn {
        previous_output,
        script_sig: ScriptBuf::new(),
        sequence: Sequence::MAX,
        witness: Witness::default(),
    }
}

/// An output paying `value` to `locking_script`.
pub fn txout(value: u64, locking_script: Vec<u8>) -> TxOut {
    TxOut {
        value: Amount::from_sat(value),
        script_pubkey: ScriptBuf::from_bytes(locking_script),
    }
}

/// The record written after a coinbase input: zero value, empty script.
pub fn coinbase_spent_output() -> SpentOutput {
    txout(0, Vec::new())
}

/// Returns `true` when `input` spends the all-zero identifier, whatever its
/// output index.
pub fn is_coinbase(input: &TxIn) -> bool {
    input.previous_output.txid == Txid::all_zeros()
}
