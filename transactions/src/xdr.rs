//! XDR encoding of transactions and envelopes.
//!
//! Only the subset this crate produces is implemented: ed25519 accounts,
//! native and alphanumeric assets, the three supported operations, time-bound
//! preconditions and text/id memos. All integers are big-endian and every
//! variable-length field is padded to a multiple of four bytes.

use pitoken_types::{AccountId, Asset, Signature, TimeBounds};

use crate::envelope::{DecoratedSignature, TransactionEnvelope};
use crate::memo::Memo;
use crate::transaction::Transaction;
use crate::{ChangeTrustOp, Operation, OperationBody, PaymentOp, SetOptionsOp};

/// Envelope type of a v1 transaction; also prefixes the signature payload.
pub const ENVELOPE_TYPE_TX: i32 = 2;

const PUBLIC_KEY_TYPE_ED25519: i32 = 0;
const KEY_TYPE_ED25519: i32 = 0;

const ASSET_TYPE_NATIVE: i32 = 0;
const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;

const PRECOND_NONE: i32 = 0;
const PRECOND_TIME: i32 = 1;

const MEMO_NONE: i32 = 0;
const MEMO_TEXT: i32 = 1;
const MEMO_ID: i32 = 2;

const OP_PAYMENT: i32 = 1;
const OP_SET_OPTIONS: i32 = 5;
const OP_CHANGE_TRUST: i32 = 6;

/// Append-only XDR output buffer.
#[derive(Default)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_u32(v as u32);
    }

    /// Fixed-length opaque data, padded to a four-byte boundary.
    pub fn write_opaque_fixed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.pad(bytes.len());
    }

    /// Variable-length opaque data or string: length prefix, bytes, padding.
    pub fn write_opaque_var(&mut self, bytes: &[u8]) {
        self.write_u32(bytes.len() as u32);
        self.write_opaque_fixed(bytes);
    }

    fn pad(&mut self, len: usize) {
        let padding = (4 - len % 4) % 4;
        self.buf.extend(std::iter::repeat(0u8).take(padding));
    }
}

/// Types with an XDR encoding.
pub trait WriteXdr {
    fn write_xdr(&self, w: &mut XdrWriter);

    fn to_xdr_bytes(&self) -> Vec<u8> {
        let mut w = XdrWriter::new();
        self.write_xdr(&mut w);
        w.into_bytes()
    }
}

/// `AccountID` is a `PublicKey` union with a single ed25519 arm.
impl WriteXdr for AccountId {
    fn write_xdr(&self, w: &mut XdrWriter) {
        w.write_i32(PUBLIC_KEY_TYPE_ED25519);
        w.write_opaque_fixed(self.as_bytes());
    }
}

/// `MuxedAccount` in its plain (non-multiplexed) ed25519 form.
struct Muxed<'a>(&'a AccountId);

impl WriteXdr for Muxed<'_> {
    fn write_xdr(&self, w: &mut XdrWriter) {
        w.write_i32(KEY_TYPE_ED25519);
        w.write_opaque_fixed(self.0.as_bytes());
    }
}

/// `Asset`; `ChangeTrustAsset` shares the same arms for these types.
impl WriteXdr for Asset {
    fn write_xdr(&self, w: &mut XdrWriter) {
        match self {
            Asset::Native => w.write_i32(ASSET_TYPE_NATIVE),
            Asset::Credit { code, issuer } => {
                let (discriminant, width) = if code.is_short() {
                    (ASSET_TYPE_CREDIT_ALPHANUM4, 4)
                } else {
                    (ASSET_TYPE_CREDIT_ALPHANUM12, 12)
                };
                w.write_i32(discriminant);
                let mut padded = [0u8; 12];
                padded[..code.as_str().len()].copy_from_slice(code.as_str().as_bytes());
                w.write_opaque_fixed(&padded[..width]);
                issuer.write_xdr(w);
            }
        }
    }
}

impl WriteXdr for Memo {
    fn write_xdr(&self, w: &mut XdrWriter) {
        match self {
            Memo::None => w.write_i32(MEMO_NONE),
            Memo::Text(text) => {
                w.write_i32(MEMO_TEXT);
                w.write_opaque_var(text.as_bytes());
            }
            Memo::Id(id) => {
                w.write_i32(MEMO_ID);
                w.write_u64(*id);
            }
        }
    }
}

/// `Preconditions`: none, or time bounds only.
impl WriteXdr for Option<TimeBounds> {
    fn write_xdr(&self, w: &mut XdrWriter) {
        match self {
            None => w.write_i32(PRECOND_NONE),
            Some(bounds) => {
                w.write_i32(PRECOND_TIME);
                w.write_u64(bounds.min_time);
                w.write_u64(bounds.max_time);
            }
        }
    }
}

impl WriteXdr for ChangeTrustOp {
    fn write_xdr(&self, w: &mut XdrWriter) {
        self.asset.write_xdr(w);
        w.write_i64(self.limit.stroops());
    }
}

impl WriteXdr for PaymentOp {
    fn write_xdr(&self, w: &mut XdrWriter) {
        Muxed(&self.destination).write_xdr(w);
        self.asset.write_xdr(w);
        w.write_i64(self.amount.stroops());
    }
}

impl WriteXdr for SetOptionsOp {
    fn write_xdr(&self, w: &mut XdrWriter) {
        // inflationDest, clearFlags, setFlags, masterWeight and the three
        // thresholds are all absent.
        for _ in 0..7 {
            w.write_bool(false);
        }
        w.write_bool(true);
        w.write_opaque_var(self.home_domain.as_str().as_bytes());
        // signer
        w.write_bool(false);
    }
}

impl WriteXdr for Operation {
    fn write_xdr(&self, w: &mut XdrWriter) {
        match &self.source_account {
            None => w.write_bool(false),
            Some(source) => {
                w.write_bool(true);
                Muxed(source).write_xdr(w);
            }
        }
        match &self.body {
            OperationBody::Payment(op) => {
                w.write_i32(OP_PAYMENT);
                op.write_xdr(w);
            }
            OperationBody::SetOptions(op) => {
                w.write_i32(OP_SET_OPTIONS);
                op.write_xdr(w);
            }
            OperationBody::ChangeTrust(op) => {
                w.write_i32(OP_CHANGE_TRUST);
                op.write_xdr(w);
            }
        }
    }
}

impl WriteXdr for Transaction {
    fn write_xdr(&self, w: &mut XdrWriter) {
        Muxed(&self.source).write_xdr(w);
        w.write_u32(self.fee);
        w.write_i64(self.sequence);
        self.time_bounds.write_xdr(w);
        self.memo.write_xdr(w);
        w.write_u32(self.operations.len() as u32);
        for op in &self.operations {
            op.write_xdr(w);
        }
        // ext
        w.write_i32(0);
    }
}

impl WriteXdr for Signature {
    fn write_xdr(&self, w: &mut XdrWriter) {
        w.write_opaque_var(self.as_bytes());
    }
}

impl WriteXdr for DecoratedSignature {
    fn write_xdr(&self, w: &mut XdrWriter) {
        w.write_opaque_fixed(&self.hint);
        self.signature.write_xdr(w);
    }
}

impl WriteXdr for TransactionEnvelope {
    fn write_xdr(&self, w: &mut XdrWriter) {
        w.write_i32(ENVELOPE_TYPE_TX);
        self.tx.write_xdr(w);
        w.write_u32(self.signatures.len() as u32);
        for sig in &self.signatures {
            sig.write_xdr(w);
        }
    }
}

pub fn encode_transaction(tx: &Transaction) -> Vec<u8> {
    tx.to_xdr_bytes()
}

pub fn encode_envelope(envelope: &TransactionEnvelope) -> Vec<u8> {
    envelope.to_xdr_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitoken_types::{AssetCode, HomeDomain, PublicKey};

    fn account(byte: u8) -> AccountId {
        AccountId::new(PublicKey([byte; 32]))
    }

    #[test]
    fn strings_are_padded() {
        let mut w = XdrWriter::new();
        w.write_opaque_var(b"abcde");
        assert_eq!(
            w.into_bytes(),
            vec![0, 0, 0, 5, b'a', b'b', b'c', b'd', b'e', 0, 0, 0]
        );
    }

    #[test]
    fn short_code_uses_four_byte_form() {
        let asset = Asset::credit(AssetCode::new("TST").unwrap(), account(1));
        let bytes = asset.to_xdr_bytes();
        assert_eq!(&bytes[..4], &[0, 0, 0, 1]);
        assert_eq!(&bytes[4..8], b"TST\0");
        // discriminant + code + account id union
        assert_eq!(bytes.len(), 4 + 4 + 4 + 32);
    }

    #[test]
    fn long_code_uses_twelve_byte_form() {
        let asset = Asset::credit(AssetCode::new("TESTTOKEN").unwrap(), account(1));
        let bytes = asset.to_xdr_bytes();
        assert_eq!(&bytes[..4], &[0, 0, 0, 2]);
        assert_eq!(&bytes[4..16], b"TESTTOKEN\0\0\0");
        assert_eq!(bytes.len(), 4 + 12 + 4 + 32);
    }

    #[test]
    fn set_options_only_sets_home_domain() {
        let op = SetOptionsOp {
            home_domain: HomeDomain::new("example.com").unwrap(),
        };
        let bytes = op.to_xdr_bytes();
        // 7 absent optionals, present flag, length 11, 12 padded bytes, absent signer
        assert_eq!(bytes.len(), 7 * 4 + 4 + 4 + 12 + 4);
        assert_eq!(&bytes[28..32], &[0, 0, 0, 1]);
        assert_eq!(&bytes[32..36], &[0, 0, 0, 11]);
        assert_eq!(&bytes[36..47], b"example.com");
    }

    #[test]
    fn memo_encodings() {
        assert_eq!(Memo::None.to_xdr_bytes(), vec![0, 0, 0, 0]);
        assert_eq!(
            Memo::Id(7).to_xdr_bytes(),
            vec![0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 7]
        );
    }
}
