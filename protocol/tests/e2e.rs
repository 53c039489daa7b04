//! End-to-end integration tests for the TEF codec.
//!
//! These tests drive the public API only: build transactions, encode them,
//! push the bytes back through the decoder and the identifier extractor, and
//! check that every path agrees.
//!
//! Each test builds its own fixtures. No shared state, no ordering.

use std::io::{self, Cursor, Read};

use bitcoin::hashes::Hash;
use tef_protocol::config::{MARKER, MARKER_LOCK_TIME};
use tef_protocol::tef::{self, Layout};
use tef_protocol::transaction::{
    coinbase_spent_output, txin, txout, ExtendedTransaction, OutPoint, ScriptBuf, Transaction,
    TransactionWithOutputs, Txid, WithAncestors,
};
use tef_protocol::wire::{CodecError, FormatError};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// A parent with one output per value, each with a distinct script.
fn parent(values: &[u64]) -> Transaction {
    let mut tx = Transaction::new(1, 0);
    for (i, value) in values.iter().enumerate() {
        tx.outputs
            .push(txout(*value, vec![0x76, 0xA9, 0x14, i as u8]));
    }
    tx
}

/// A child spending `vouts` of `parent`, with one output per value.
fn child(parent: &Transaction, vouts: &[u32], values: &[u64]) -> Transaction {
    let mut tx = Transaction::new(2, 0);
    for vout in vouts {
        let mut input = txin(OutPoint::new(parent.txid(), *vout));
        input.script_sig = ScriptBuf::from_bytes(vec![0x47; 72]);
        tx.inputs.push(input);
    }
    for value in values {
        tx.outputs.push(txout(*value, vec![0x51]));
    }
    tx
}

/// Hands out `bytes[..fail_at]`, then fails every read with `kind`.
struct FailingReader<'a> {
    bytes: &'a [u8],
    fail_at: usize,
    kind: io::ErrorKind,
}

impl Read for FailingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_at == 0 {
            return Err(io::Error::new(self.kind, "stream failed"));
        }
        let n = buf.len().min(self.fail_at).min(self.bytes.len());
        buf[..n].copy_from_slice(&self.bytes[..n]);
        self.bytes = &self.bytes[n..];
        self.fail_at -= n;
        Ok(n)
    }
}

/// Resolves `tx` against `parent` and flattens it.
fn extended(tx: Transaction, parent: Transaction) -> ExtendedTransaction {
    WithAncestors::new(tx)
        .with_ancestor(parent)
        .into_extended()
        .expect("all inputs resolvable")
}

// ---------------------------------------------------------------------------
// 1. Single Spend Round Trip
// ---------------------------------------------------------------------------

#[test]
fn single_spend_round_trip() {
    let funding = parent(&[10_000]);
    let etx = extended(child(&funding, &[0], &[9_990]), funding.clone());

    let wire = tef::encode_to_vec(&etx).unwrap();
    let (decoded, layout) = tef::decode_with_layout(&mut &wire[..]).unwrap();

    assert_eq!(layout, Layout::Extended);
    assert_eq!(decoded.spent_outputs.len(), 1);
    assert_eq!(decoded.spent_outputs[0].value.to_sat(), 10_000);
    assert_eq!(
        decoded.spent_outputs[0].script_pubkey,
        funding.outputs[0].script_pubkey
    );
    assert_eq!(decoded.txid(), Txid::hash(&etx.tx.to_plain_bytes()));
    assert_eq!(decoded.fee(), Some(10));
}

// ---------------------------------------------------------------------------
// 2. Identifier Equivalence Across All Layouts
// ---------------------------------------------------------------------------

#[test]
fn identifier_agrees_with_decoder_for_every_layout() {
    let funding = parent(&[500, 700]);
    let spender = extended(child(&funding, &[1, 0], &[1_000, 150]), funding);

    let mut outputs_only = Transaction::new(1, 5);
    outputs_only.outputs.push(txout(1, vec![0x6A]));

    let payloads: Vec<(Vec<u8>, Layout)> = vec![
        (
            spender.tx.to_plain_bytes(),
            Layout::PlainWithInputs { input_count: 2 },
        ),
        (
            outputs_only.to_plain_bytes(),
            Layout::PlainZeroInputs { output_count: 1 },
        ),
        (
            Transaction::new(1, 12_345).to_plain_bytes(),
            Layout::PlainEmpty { lock_time: 12_345 },
        ),
        (tef::encode_to_vec(&spender).unwrap(), Layout::Extended),
    ];

    for (wire, expected) in payloads {
        let (decoded, layout) = tef::decode_with_layout(&mut &wire[..]).unwrap();
        let (txid, txid_layout) = tef::txid_with_layout(&mut &wire[..]).unwrap();
        assert_eq!(layout, expected);
        assert_eq!(txid_layout, expected);
        assert_eq!(txid, decoded.tx.txid(), "layout {expected}");
    }
}

// ---------------------------------------------------------------------------
// 3. Empty Transactions
// ---------------------------------------------------------------------------

#[test]
fn empty_transactions_are_plain_empty() {
    for lock_time in [0, 12_345, MARKER_LOCK_TIME - 1, MARKER_LOCK_TIME + 1] {
        let tx = Transaction::new(1, lock_time);
        let wire = tef::encode_to_vec(&ExtendedTransaction::plain(tx.clone())).unwrap();
        assert_eq!(wire, tx.to_plain_bytes());

        let (decoded, layout) = tef::decode_with_layout(&mut &wire[..]).unwrap();
        assert_eq!(layout, Layout::PlainEmpty { lock_time });
        assert_eq!(decoded.tx, tx);
        assert!(decoded.spent_outputs.is_empty());
    }
}

// ---------------------------------------------------------------------------
// 4. Marker Collision
// ---------------------------------------------------------------------------

/// No inputs, no outputs, lock time equal to the sentinel: the plain bytes
/// end exactly where an extended header would, so the payload cannot be read
/// back. The format accepts this collision.
#[test]
fn sentinel_lock_time_is_indistinguishable_from_marker() {
    let tx = Transaction::new(1, MARKER_LOCK_TIME);
    let wire = tx.to_plain_bytes();
    assert_eq!(&wire[4..], &MARKER);

    let err = tef::decode(&mut &wire[..]).unwrap_err();
    assert!(matches!(
        err.as_format(),
        Some(FormatError::Truncated { .. })
    ));
    assert!(tef::txid_from_bytes(&wire).is_err());
}

// ---------------------------------------------------------------------------
// 5. Back-to-Back Stream
// ---------------------------------------------------------------------------

#[test]
fn back_to_back_payloads_decode_sequentially() {
    let funding = parent(&[10_000, 20_000]);
    let first = extended(child(&funding, &[0], &[9_000]), funding.clone());
    let second = child(&funding, &[1], &[19_000]);

    let mut stream = tef::encode_to_vec(&first).unwrap();
    stream.extend(second.to_plain_bytes());
    stream.extend(Transaction::new(1, 1).to_plain_bytes());

    let mut cursor = Cursor::new(&stream[..]);
    let a = tef::decode(&mut cursor).unwrap();
    let b = tef::decode(&mut cursor).unwrap();
    let c = tef::decode(&mut cursor).unwrap();
    assert_eq!(cursor.position() as usize, stream.len());

    assert_eq!(a, first);
    assert_eq!(b.tx, second);
    assert!(b.spent_outputs.is_empty());
    assert_eq!(c.tx.lock_time, 1);

    let txids = tef::txids_all(&stream).unwrap();
    assert_eq!(txids, vec![first.txid(), second.txid(), c.txid()]);
    assert_eq!(tef::decode_all(&stream).unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// 6. Encoder Failures
// ---------------------------------------------------------------------------

#[test]
fn unresolvable_input_aborts_before_writing() {
    let funding = parent(&[10_000]);
    let mut tx = child(&funding, &[0], &[9_000]);
    tx.inputs
        .push(txin(OutPoint::new(Txid::hash(b"elsewhere"), 0)));

    let source = WithAncestors::new(tx).with_ancestor(funding);
    assert!(source.spent_output(0).is_some());
    assert!(source.spent_output(1).is_none());

    let mut sink = Vec::new();
    match tef::encode(&mut sink, &source) {
        Err(CodecError::MissingSpentOutput {
            input_index,
            outpoint,
        }) => {
            assert_eq!(input_index, 1);
            assert_eq!(outpoint.txid, Txid::hash(b"elsewhere"));
        }
        other => panic!("expected MissingSpentOutput, got {other:?}"),
    }
    assert!(sink.is_empty());
}

#[test]
fn coinbase_carries_exactly_one_zero_record() {
    let mut tx = Transaction::new(1, 0);
    let mut coinbase = txin(OutPoint::null());
    coinbase.script_sig = ScriptBuf::from_bytes(vec![0x03, 0xA0, 0x86, 0x01]);
    tx.inputs.push(coinbase);
    tx.outputs.push(txout(5_000_000_000, vec![0x51]));

    // No resolver entry needed.
    let source = WithAncestors::new(tx.clone());
    let wire = tef::encode_to_vec(&source).unwrap();

    let decoded = tef::decode(&mut &wire[..]).unwrap();
    assert_eq!(decoded.tx, tx);
    assert_eq!(decoded.spent_outputs, vec![coinbase_spent_output()]);
    assert_eq!(wire.len(), tx.plain_size() + MARKER.len() + 8 + 1);
}

#[test]
fn surplus_spent_outputs_are_an_error_not_dropped() {
    let funding = parent(&[10_000, 20_000]);
    let mut etx = extended(child(&funding, &[0], &[9_000]), funding.clone());
    // Bypass the checked constructor.
    etx.spent_outputs.push(funding.outputs[1].clone());

    let mut sink = Vec::new();
    match tef::encode(&mut sink, &etx) {
        Err(CodecError::MisalignedSpentOutputs {
            inputs,
            spent_outputs,
        }) => {
            assert_eq!(inputs, 1);
            assert_eq!(spent_outputs, 2);
        }
        other => panic!("expected MisalignedSpentOutputs, got {other:?}"),
    }
    assert!(sink.is_empty());
}

// ---------------------------------------------------------------------------
// 7. Decoder Failures
// ---------------------------------------------------------------------------

#[test]
fn every_truncation_of_an_extended_payload_fails() {
    let funding = parent(&[10_000]);
    let etx = extended(child(&funding, &[0], &[9_990]), funding);
    let wire = tef::encode_to_vec(&etx).unwrap();

    for cut in 0..wire.len() {
        let err = tef::decode(&mut &wire[..cut]).unwrap_err();
        assert!(
            matches!(err.as_format(), Some(FormatError::Truncated { .. })),
            "cut {cut}: {err}"
        );
        assert!(tef::txid_from_bytes(&wire[..cut]).is_err(), "cut {cut}");
    }
}

#[test]
fn non_minimal_counts_are_rejected() {
    // Input count 1 written as FD 01 00.
    let mut wire = vec![1, 0, 0, 0, 0xFD, 0x01, 0x00];
    wire.extend_from_slice(&[0u8; 41]);
    wire.extend_from_slice(&[0, 0, 0, 0, 0]);

    let err = tef::decode(&mut &wire[..]).unwrap_err();
    assert_eq!(
        err.as_format(),
        Some(&FormatError::NonMinimalVarInt {
            field: "input count"
        })
    );
    assert!(tef::txid_from_bytes(&wire).is_err());
}

#[test]
fn huge_declared_count_does_not_allocate_up_front() {
    // Claims 2^32 outputs, then ends.
    let wire = vec![
        1, 0, 0, 0, 0x00, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
    ];
    let err = tef::decode(&mut &wire[..]).unwrap_err();
    assert!(matches!(
        err.as_format(),
        Some(FormatError::Truncated { .. })
    ));
}

#[test]
fn reader_faults_surface_with_their_field() {
    let funding = parent(&[10_000]);
    let etx = extended(child(&funding, &[0], &[9_990]), funding);
    let plain = etx.tx.to_plain_bytes();
    let wire = tef::encode_to_vec(&etx).unwrap();

    // Version, input count, then ten bytes into the first input's hash.
    let reader = || FailingReader {
        bytes: &plain[..],
        fail_at: 4 + 1 + 10,
        kind: io::ErrorKind::ConnectionReset,
    };
    match tef::decode(&mut reader()) {
        Err(CodecError::Io { field, source }) => {
            assert_eq!(field, "input");
            assert_eq!(source.kind(), io::ErrorKind::ConnectionReset);
        }
        other => panic!("expected Io from decode, got {other:?}"),
    }
    match tef::txid_from_reader(&mut reader()) {
        Err(CodecError::Io { field, source }) => {
            assert_eq!(field, "input");
            assert_eq!(source.kind(), io::ErrorKind::ConnectionReset);
        }
        other => panic!("expected Io from txid_from_reader, got {other:?}"),
    }

    // Extended payload failing right where the marker's lock-time half starts.
    let mut early = FailingReader {
        bytes: &wire[..],
        fail_at: 6,
        kind: io::ErrorKind::BrokenPipe,
    };
    let err = tef::decode(&mut early).unwrap_err();
    assert!(err.as_format().is_none());
    assert!(
        matches!(err, CodecError::Io { field: "lock time", .. }),
        "{err}"
    );
}

// ---------------------------------------------------------------------------
// 8. Fee Accounting
// ---------------------------------------------------------------------------

#[test]
fn fee_follows_spent_outputs() {
    let funding = parent(&[4_000, 6_000]);
    let etx = extended(child(&funding, &[0, 1], &[7_500, 2_000]), funding);

    let wire = tef::encode_to_vec(&etx).unwrap();
    let decoded = tef::decode(&mut &wire[..]).unwrap();
    assert_eq!(decoded.total_spent(), Some(10_000));
    assert_eq!(decoded.total_output(), Some(9_500));
    assert_eq!(decoded.fee(), Some(500));

    let stripped = tef::decode(&mut &decoded.tx.to_plain_bytes()[..]).unwrap();
    assert_eq!(stripped.fee(), None);
    assert_eq!(stripped.txid(), decoded.txid());
}
