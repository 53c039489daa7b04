//! Error types for the wire codec.
//!
//! Every codec operation that can fail returns a [`CodecError`]. Nothing in
//! the codec retries: a failure means the payload (or the stream under it)
//! is unusable and the caller decides what to do next.

use std::io;

use bitcoin::consensus::encode;
use thiserror::Error;

use crate::transaction::OutPoint;

/// The payload is structurally corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The stream ended in the middle of a field, or a length prefix
    /// declared more bytes than the stream still holds.
    #[error("truncated payload while reading {field}")]
    Truncated {
        /// The field being read when the stream ran dry.
        field: &'static str,
    },

    /// A varint used a longer encoding than its value needs.
    #[error("non-minimal varint encoding in {field}")]
    NonMinimalVarInt {
        /// The field carrying the varint.
        field: &'static str,
    },

    /// A length prefix exceeds the configured ceiling for its field.
    #[error("{field} declares {declared} bytes (max: {max})")]
    OversizedField {
        /// The field carrying the oversized length prefix.
        field: &'static str,
        /// Length declared on the wire.
        declared: u64,
        /// Largest accepted length.
        max: usize,
    },

    /// The record decoder rejected a field for any other reason.
    #[error("malformed {field}: {reason}")]
    Malformed {
        /// The field being read.
        field: &'static str,
        /// The decoder's description of the problem.
        reason: String,
    },
}

/// Errors that can occur while encoding or decoding transactions.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The underlying reader or writer failed for a reason other than
    /// running out of data.
    #[error("i/o error on {field}: {source}")]
    Io {
        /// The field being read or written.
        field: &'static str,
        /// The original I/O error.
        #[source]
        source: io::Error,
    },

    /// The payload is malformed.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// The encoder could not resolve the output spent by a non-coinbase input.
    #[error("missing spent output for input {input_index} ({outpoint})")]
    MissingSpentOutput {
        /// Position of the input in the transaction.
        input_index: usize,
        /// The previous-output reference that could not be resolved.
        outpoint: OutPoint,
    },

    /// Spent outputs must be absent or aligned one-to-one with inputs.
    #[error("{spent_outputs} spent outputs for {inputs} inputs")]
    MisalignedSpentOutputs {
        /// Number of inputs in the transaction.
        inputs: usize,
        /// Number of spent outputs supplied.
        spent_outputs: usize,
    },
}

impl CodecError {
    /// Classifies a read failure: end-of-stream is a format problem, anything
    /// else is a genuine I/O fault.
    pub(crate) fn on_read(field: &'static str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            FormatError::Truncated { field }.into()
        } else {
            CodecError::Io { field, source }
        }
    }

    /// Classifies a `bitcoin` consensus decoding failure on `field`.
    pub(crate) fn on_decode(field: &'static str, err: encode::Error) -> Self {
        match err {
            encode::Error::Io(source) => Self::on_read(field, source),
            encode::Error::NonMinimalVarInt => FormatError::NonMinimalVarInt { field }.into(),
            encode::Error::OversizedVectorAllocation { requested, max } => {
                FormatError::OversizedField {
                    field,
                    declared: requested as u64,
                    max,
                }
                .into()
            }
            other => FormatError::Malformed {
                field,
                reason: other.to_string(),
            }
            .into(),
        }
    }

    /// Wraps a write failure.
    pub(crate) fn on_write(field: &'static str, source: io::Error) -> Self {
        CodecError::Io { field, source }
    }

    /// Returns the inner [`FormatError`], if this is one.
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            CodecError::Format(e) => Some(e),
            _ => None,
        }
    }
}
