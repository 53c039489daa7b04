//! # Transaction Module
//!
//! The data model shared by the plain and extended formats.
//!
//! ## Architecture
//!
//! ```text
//! types.rs     - bitcoin record types, SpentOutput, constructors
//! tx.rs        - Transaction and its plain serialization + identifier
//! extended.rs  - ExtendedTransaction, the encoder's TransactionWithOutputs
//!                contract, and the ancestor-backed resolver
//! ```
//!
//! ## Design Decisions
//!
//! - Identifiers are `sha256d` of the plain serialization, whichever format
//!   the transaction travelled in.
//! - Amounts are satoshi counts. Sums use checked arithmetic and report
//!   overflow as `None`.
//! - Scripts are opaque byte strings. Nothing here executes or inspects them.

pub mod extended;
pub mod tx;
pub mod types;

pub use extended::{ExtendedTransaction, TransactionWithOutputs, WithAncestors};
pub use tx::Transaction;
pub use types::{
    coinbase_spent_output, is_coinbase, txin, txout, Amount, OutPoint, ScriptBuf, Sequence,
    SpentOutput, TxIn, TxOut, Txid, Witness,
};
