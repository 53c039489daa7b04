//! Transactions paired with the outputs their inputs spend.
//!
//! [`ExtendedTransaction`] is what the decoder hands back. The encoder is
//! less picky: it accepts anything implementing [`TransactionWithOutputs`],
//! so callers holding parent transactions instead of a flat spent-output
//! list can use [`WithAncestors`] and skip the copying.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::tx::Transaction;
use super::types::{coinbase_spent_output, is_coinbase, SpentOutput, TxOut, Txid};
use crate::wire::CodecError;

// ---------------------------------------------------------------------------
// TransactionWithOutputs
// ---------------------------------------------------------------------------

/// A transaction whose spent outputs can be looked up by input index.
///
/// This is the encoder's only view of its input. `spent_output` returns
/// `None` when the output is unknown; the encoder turns that into
/// [`CodecError::MissingSpentOutput`] unless the input is a coinbase.
pub trait TransactionWithOutputs {
    /// The transaction itself.
    fn transaction(&self) -> &Transaction;

    /// The output spent by `inputs[input_index]`, if known.
    fn spent_output(&self, input_index: usize) -> Option<&TxOut>;

    /// Length of the flat spent-output list, for sources that hold one.
    ///
    /// The encoder rejects a nonzero length that differs from the input
    /// count. Resolvers that look outputs up on demand keep the default.
    fn spent_output_count(&self) -> Option<usize> {
        None
    }
}

// ---------------------------------------------------------------------------
// ExtendedTransaction
// ---------------------------------------------------------------------------

/// A transaction plus the outputs spent by its inputs.
///
/// `spent_outputs` is either empty (plain source) or exactly as long as
/// `tx.inputs`, with `spent_outputs[i]` belonging to `tx.inputs[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedTransaction {
    /// The transaction.
    pub tx: Transaction,
    /// Outputs spent by each input, in input order. Empty when unknown.
    #[serde(default)]
    pub spent_outputs: Vec<SpentOutput>,
}

impl ExtendedTransaction {
    /// Pairs a transaction with its spent outputs, checking alignment.
    pub fn new(tx: Transaction, spent_outputs: Vec<SpentOutput>) -> Result<Self, CodecError> {
        if !spent_outputs.is_empty() && spent_outputs.len() != tx.inputs.len() {
            return Err(CodecError::MisalignedSpentOutputs {
                inputs: tx.inputs.len(),
                spent_outputs: spent_outputs.len(),
            });
        }
        Ok(Self { tx, spent_outputs })
    }

    /// A transaction without spent-output data.
    pub fn plain(tx: Transaction) -> Self {
        Self {
            tx,
            spent_outputs: Vec::new(),
        }
    }

    /// Returns `true` when spent outputs are attached.
    pub fn is_extended(&self) -> bool {
        !self.spent_outputs.is_empty()
    }

    /// Identifier of the underlying transaction.
    pub fn txid(&self) -> Txid {
        self.tx.txid()
    }

    /// Sum of the spent outputs' values.
    ///
    /// `None` when no spent outputs are attached or the sum overflows.
    pub fn total_spent(&self) -> Option<u64> {
        if !self.is_extended() {
            return None;
        }
        self.spent_outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.value.to_sat()))
    }

    /// Sum of the transaction's output values. `None` on overflow.
    pub fn total_output(&self) -> Option<u64> {
        self.tx
            .outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.value.to_sat()))
    }

    /// Spent minus output value.
    ///
    /// `None` when spent outputs are absent, a sum overflows, or the outputs
    /// exceed what is spent. Whether a fee is *acceptable* is not decided
    /// here.
    pub fn fee(&self) -> Option<u64> {
        self.total_spent()?.checked_sub(self.total_output()?)
    }

    /// Fee per byte of the plain serialization.
    pub fn fee_rate(&self) -> Option<f64> {
        let fee = self.fee()?;
        Some(fee as f64 / self.tx.plain_size() as f64)
    }
}

impl TransactionWithOutputs for ExtendedTransaction {
    fn transaction(&self) -> &Transaction {
        &self.tx
    }

    fn spent_output(&self, input_index: usize) -> Option<&TxOut> {
        self.spent_outputs.get(input_index)
    }

    fn spent_output_count(&self) -> Option<usize> {
        Some(self.spent_outputs.len())
    }
}

impl From<Transaction> for ExtendedTransaction {
    fn from(tx: Transaction) -> Self {
        Self::plain(tx)
    }
}

// ---------------------------------------------------------------------------
// WithAncestors
// ---------------------------------------------------------------------------

/// A transaction resolved against the parent transactions it spends from.
///
/// # Example
///
/// ```
/// use tef_protocol::transaction::{txin, txout, OutPoint, Transaction, TransactionWithOutputs, WithAncestors};
///
/// let mut parent = Transaction::new(1, 0);
/// parent.outputs.push(txout(10_000, vec![0x51]));
///
/// let mut child = Transaction::new(1, 0);
/// child.inputs.push(txin(OutPoint::new(parent.txid(), 0)));
///
/// let resolved = WithAncestors::new(child).with_ancestor(parent);
/// assert_eq!(resolved.spent_output(0).map(|o| o.value.to_sat()), Some(10_000));
/// ```
#[derive(Debug, Clone, Default)]
pub struct WithAncestors {
    tx: Transaction,
    ancestors: HashMap<Txid, Transaction>,
}

impl WithAncestors {
    /// Wraps a transaction with no known ancestors.
    pub fn new(tx: Transaction) -> Self {
        Self {
            tx,
            ancestors: HashMap::new(),
        }
    }

    /// Registers a parent transaction, keyed by its identifier.
    pub fn with_ancestor(mut self, ancestor: Transaction) -> Self {
        self.add_ancestor(ancestor);
        self
    }

    /// Registers a parent transaction, keyed by its identifier.
    pub fn add_ancestor(&mut self, ancestor: Transaction) {
        self.ancestors.insert(ancestor.txid(), ancestor);
    }

    /// Number of registered ancestors.
    pub fn ancestor_count(&self) -> usize {
        self.ancestors.len()
    }

    /// Flattens into an [`ExtendedTransaction`].
    ///
    /// Fails on the first non-coinbase input whose parent is missing.
    /// Coinbase inputs get a zero-valued placeholder.
    pub fn into_extended(self) -> Result<ExtendedTransaction, CodecError> {
        let mut spent = Vec::with_capacity(self.tx.inputs.len());
        for (input_index, input) in self.tx.inputs.iter().enumerate() {
            if is_coinbase(input) {
                spent.push(coinbase_spent_output());
                continue;
            }
            let output = self
                .spent_output(input_index)
                .cloned()
                .ok_or(CodecError::MissingSpentOutput {
                    input_index,
                    outpoint: input.previous_output,
                })?;
            spent.push(output);
        }
        ExtendedTransaction::new(self.tx, spent)
    }
}

impl TransactionWithOutputs for WithAncestors {
    fn transaction(&self) -> &Transaction {
        &self.tx
    }

    fn spent_output(&self, input_index: usize) -> Option<&TxOut> {
        let outpoint = self.tx.inputs.get(input_index)?.previous_output;
        self.ancestors
            .get(&outpoint.txid)?
            .outputs
            .get(outpoint.vout as usize)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
