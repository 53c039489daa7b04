// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # TEF Protocol - Core Library
//!
//! Encoding and decoding for the Transaction Extended Format: a transaction
//! serialization that carries the outputs each input spends, so fees and
//! scripts can be checked without fetching parent transactions.
//!
//! ## Architecture
//!
//! - **config** - Format constants and allocation limits.
//! - **wire** - Field and record plumbing over `bitcoin` consensus encoding,
//!   and the codec's errors.
//! - **transaction** - The data model and the plain serialization.
//! - **tef** - The extended encoder, the decoder, and identifier extraction.
//!
//! ## Quick tour
//!
//! ```
//! use tef_protocol::tef;
//! use tef_protocol::transaction::{txin, txout, ExtendedTransaction, OutPoint, Transaction};
//!
//! let mut parent = Transaction::new(1, 0);
//! parent.outputs.push(txout(10_000, vec![0x51]));
//!
//! let mut child = Transaction::new(1, 0);
//! child.inputs.push(txin(OutPoint::new(parent.txid(), 0)));
//! child.outputs.push(txout(9_990, vec![0x51]));
//!
//! let etx = ExtendedTransaction::new(child, parent.outputs.clone()).unwrap();
//! let wire = tef::encode_to_vec(&etx).unwrap();
//!
//! assert_eq!(tef::txid_from_bytes(&wire).unwrap(), etx.txid());
//! assert_eq!(tef::decode(&mut &wire[..]).unwrap().fee(), Some(10));
//! ```
//!
//! ## Design Philosophy
//!
//! 1. One pass over the input, never a rewind.
//! 2. Malformed input is an error value. Nothing here panics on bad bytes.
//! 3. Declared lengths never size an allocation on their own.

pub use bitcoin;

pub mod config;
pub mod tef;
pub mod transaction;
pub mod wire;
