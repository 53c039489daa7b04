//! Layout detection.
//!
//! The extended format has no flag byte. After `version`, a payload is one
//! of four layouts, and which one is decided by values read in order:
//!
//! ```text
//! first varint > 0                                  → PlainWithInputs
//! first == 0, second varint > 0                     → PlainZeroInputs
//! first == 0, second == 0, u32 != MARKER_LOCK_TIME  → PlainEmpty
//! first == 0, second == 0, u32 == MARKER_LOCK_TIME  → Extended
//! ```
//!
//! Each test only looks at values already consumed, so detection is a single
//! forward pass with nothing to undo.
//!
//! A plain transaction with no inputs, no outputs and a lock time of exactly
//! [`MARKER_LOCK_TIME`] lands in `Extended`. The format cannot tell the two
//! apart; such a transaction cannot be carried by this codec.

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::config::MARKER_LOCK_TIME;
use crate::wire::{decode_field, read_count, CodecError};

/// The byte layout a payload turned out to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum Layout {
    /// Plain format with at least one input. The first varint was the real
    /// input count.
    PlainWithInputs {
        /// Number of input records that follow.
        input_count: u64,
    },
    /// Plain format, no inputs, at least one output. The second varint was
    /// the real output count.
    PlainZeroInputs {
        /// Number of output records that follow.
        output_count: u64,
    },
    /// Plain format with neither inputs nor outputs. The payload is complete.
    PlainEmpty {
        /// The lock time that was read in place of a marker.
        lock_time: u32,
    },
    /// Extended format: the real input count follows.
    Extended,
}

impl Layout {
    /// Reads the disambiguation prefix that follows `version`.
    ///
    /// Consumes one varint for `PlainWithInputs`, two for `PlainZeroInputs`,
    /// and two varints plus four bytes for `PlainEmpty` and `Extended`.
    pub fn read<R: Read>(r: &mut R) -> Result<Self, CodecError> {
        let first = read_count(r, "input count")?;
        if first > 0 {
            return Ok(Layout::PlainWithInputs { input_count: first });
        }

        let second = read_count(r, "output count")?;
        if second > 0 {
            return Ok(Layout::PlainZeroInputs {
                output_count: second,
            });
        }

        let candidate: u32 = decode_field(r, "lock time")?;
        if candidate != MARKER_LOCK_TIME {
            return Ok(Layout::PlainEmpty {
                lock_time: candidate,
            });
        }

        Ok(Layout::Extended)
    }

    /// Returns `true` for the extended layout.
    pub fn is_extended(&self) -> bool {
        matches!(self, Layout::Extended)
    }

    /// Short lowercase name, used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Layout::PlainWithInputs { .. } => "plain_with_inputs",
            Layout::PlainZeroInputs { .. } => "plain_zero_inputs",
            Layout::PlainEmpty { .. } => "plain_empty",
            Layout::Extended => "extended",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
