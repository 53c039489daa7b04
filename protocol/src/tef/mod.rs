//! # Extended Format Codec
//!
//! The extended format carries, next to each input, the output that input
//! spends. That lets a verifier check amounts and scripts without looking up
//! parent transactions.
//!
//! ## Wire layout
//!
//! ```text
//! version i32 LE
//! [00 00 00 00 00 EF]        marker, present iff there is at least one input
//! varint n
//! n × (input record, spent output record)
//! varint m
//! m × output record
//! lock_time u32 LE
//! ```
//!
//! A plain serialization is also accepted everywhere a payload is read. The
//! marker sits where a plain transaction keeps its input count, so the two
//! formats are told apart by [`Layout::read`].
//!
//! ## Architecture
//!
//! ```text
//! layout.rs   - the four-way prefix decision
//! sink.rs     - RecordSink and the one parse driver
//! decoder.rs  - DecodeSink: payload → ExtendedTransaction
//! txid.rs     - DigestSink: payload → Txid, nothing materialized
//! encoder.rs  - TransactionWithOutputs → extended bytes
//! ```

pub mod decoder;
pub mod encoder;
pub mod layout;
pub mod sink;
pub mod txid;

pub use decoder::{decode, decode_all, decode_with_layout};
pub use encoder::{encode, encode_to_vec};
pub use layout::Layout;
pub use sink::{parse, RecordSink};
pub use txid::{txid_from_bytes, txid_from_reader, txid_with_layout, txids_all};
