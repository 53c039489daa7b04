//! # Format Configuration & Constants
//!
//! Every magic number of the extended format lives here. If you're
//! hardcoding one of these somewhere else, import it from here instead.
//!
//! The marker values are part of the wire format. Changing them breaks every
//! payload ever produced, so they are constants, not knobs.

// ---------------------------------------------------------------------------
// Extended Format Marker
// ---------------------------------------------------------------------------

/// Lock-time value a plain-format reader sees when it walks into the marker.
///
/// A plain transaction with zero inputs, zero outputs and exactly this lock
/// time is indistinguishable from the start of an extended payload.
pub const MARKER_LOCK_TIME: u32 = 0xEF00_0000;

/// The six bytes written after `version` when a transaction has inputs.
///
/// Read as plain format: varint `0` (inputs), varint `0` (outputs), then
/// `00 00 00 EF` as a little-endian lock time, which is [`MARKER_LOCK_TIME`].
pub const MARKER: [u8; 6] = [0x00, 0x00, 0x00, 0x00, 0x00, 0xEF];

// ---------------------------------------------------------------------------
// Resource Guards
// ---------------------------------------------------------------------------

/// Largest script the identifier extractor forwards, in bytes.
///
/// Matches the per-record ceiling the `bitcoin` decoder applies, so both
/// readers reject the same payloads.
pub const MAX_SCRIPT_SIZE: usize = 4_000_000;

/// Upper bound on how many records are pre-allocated from a declared count.
///
/// Vectors still grow past this as records actually arrive; the cap only
/// stops a forged count from reserving memory the stream never backs.
pub const MAX_PREALLOC_ENTRIES: usize = 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_reads_as_sentinel_lock_time() {
        // Bytes 2..6 of the marker are the little-endian sentinel.
        let mut tail = [0u8; 4];
        tail.copy_from_slice(&MARKER[2..]);
        assert_eq!(u32::from_le_bytes(tail), MARKER_LOCK_TIME);
    }

    #[test]
    fn test_marker_starts_with_two_zero_varints() {
        assert_eq!(MARKER[0], 0);
        assert_eq!(MARKER[1], 0);
    }
}
