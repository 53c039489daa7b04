//! The single parse driver shared by the decoder and the identifier
//! extractor.
//!
//! [`parse`] walks a payload once, in wire order, and tells a
//! [`RecordSink`] what it found. It never looks at what the sink does with
//! the bytes. The decoder's sink builds structs; the identifier sink copies
//! plain-format bytes into a digest and lets extension bytes fall on the
//! floor. Neither duplicates the layout logic.

use std::io::Read;

use tracing::trace;

use super::layout::Layout;
use crate::wire::{decode_field, read_count, CodecError};

/// Receives the pieces of one payload, in wire order.
///
/// Counts and fixed-width fields arrive as values. Records arrive as a
/// reader positioned at their first byte; the sink must consume exactly one
/// record from it.
///
/// For every layout the driver reports the plain-format view:
/// `version`, `input_count`, each `input` (followed by its `spent_output`
/// in the extended layout), `output_count`, each `output`, `lock_time`.
/// Marker bytes are never reported.
pub trait RecordSink {
    /// What the sink produces once the payload is complete.
    type Output;

    /// The transaction version.
    fn version(&mut self, version: i32) -> Result<(), CodecError>;

    /// The real number of inputs.
    fn input_count(&mut self, count: u64) -> Result<(), CodecError>;

    /// Consumes one input record.
    fn input<R: Read>(&mut self, r: &mut R) -> Result<(), CodecError>;

    /// Consumes the output record spent by the input just consumed.
    fn spent_output<R: Read>(&mut self, r: &mut R) -> Result<(), CodecError>;

    /// The real number of outputs.
    fn output_count(&mut self, count: u64) -> Result<(), CodecError>;

    /// Consumes one output record.
    fn output<R: Read>(&mut self, r: &mut R) -> Result<(), CodecError>;

    /// The real lock time.
    fn lock_time(&mut self, lock_time: u32) -> Result<(), CodecError>;

    /// Completes the payload.
    fn finish(self, layout: Layout) -> Self::Output;
}

/// Parses one payload from `r` into `sink`.
///
/// On success the reader sits on the first byte after the payload.
pub fn parse<R: Read, S: RecordSink>(r: &mut R, mut sink: S) -> Result<S::Output, CodecError> {
    sink.version(decode_field(r, "version")?)?;

    let layout = Layout::read(r)?;
    trace!(%layout, "payload layout detected");

    let lock_time = match layout {
        Layout::PlainWithInputs { input_count } => {
            sink.input_count(input_count)?;
            for _ in 0..input_count {
                sink.input(r)?;
            }
            parse_outputs(r, &mut sink)?;
            decode_field(r, "lock time")?
        }
        Layout::PlainZeroInputs { output_count } => {
            sink.input_count(0)?;
            sink.output_count(output_count)?;
            for _ in 0..output_count {
                sink.output(r)?;
            }
            decode_field(r, "lock time")?
        }
        Layout::PlainEmpty { lock_time } => {
            sink.input_count(0)?;
            sink.output_count(0)?;
            lock_time
        }
        Layout::Extended => {
            let input_count = read_count(r, "input count")?;
            sink.input_count(input_count)?;
            for _ in 0..input_count {
                sink.input(r)?;
                sink.spent_output(r)?;
            }
            parse_outputs(r, &mut sink)?;
            decode_field(r, "lock time")?
        }
    };
    sink.lock_time(lock_time)?;

    Ok(sink.finish(layout))
}

fn parse_outputs<R: Read, S: RecordSink>(r: &mut R, sink: &mut S) -> Result<(), CodecError> {
    let output_count = read_count(r, "output count")?;
    sink.output_count(output_count)?;
    for _ in 0..output_count {
        sink.output(r)?;
    }
    Ok(())
}
