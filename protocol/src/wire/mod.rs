//! # Wire Primitives
//!
//! The field-level codec every transaction layout is built from. Integers,
//! varints and the standard input and output records come from the
//! `bitcoin` crate's consensus encoding; this module wraps them with field
//! names and the codec's error type:
//!
//! ```text
//! error.rs   - CodecError / FormatError, bitcoin error classification
//! record.rs  - field decode/encode, record counts, record forwarding
//! ```
//!
//! All readers work on any [`std::io::Read`] and consume exactly the bytes
//! of the field they read, so a stream holding several payloads back to
//! back can be walked one call at a time.

pub mod error;
pub mod record;

pub use error::{CodecError, FormatError};
pub use record::{decode_field, encode_field, read_count, write_count};
