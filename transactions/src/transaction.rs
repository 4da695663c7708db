//! Transaction: ordered operations under one source account.

use pitoken_crypto::{network_id, sha256};
use pitoken_types::{AccountId, NetworkId, TimeBounds, TxHash};
use serde::{Deserialize, Serialize};

use crate::memo::Memo;
use crate::xdr::{self, ENVELOPE_TYPE_TX};
use crate::Operation;

/// An unsigned transaction.
///
/// `sequence` must be exactly one more than the source account's current
/// sequence number at the time the network applies it; `fee` is the total
/// for all operations, in stroops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub source: AccountId,
    pub fee: u32,
    pub sequence: i64,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Vec<Operation>,
}

impl Transaction {
    /// XDR encoding of the transaction body.
    pub fn to_xdr(&self) -> Vec<u8> {
        xdr::encode_transaction(self)
    }

    /// Bytes that signers sign: network id ‖ envelope type ‖ transaction.
    pub fn signature_payload(&self, network: &NetworkId) -> Vec<u8> {
        let body = self.to_xdr();
        let mut payload = Vec::with_capacity(36 + body.len());
        payload.extend_from_slice(&network_id(network.passphrase()));
        payload.extend_from_slice(&ENVELOPE_TYPE_TX.to_be_bytes());
        payload.extend_from_slice(&body);
        payload
    }

    /// The transaction hash on `network`; what signatures cover.
    pub fn hash(&self, network: &NetworkId) -> TxHash {
        TxHash::new(sha256(&self.signature_payload(network)))
    }

    /// Every account whose signature the transaction needs: the source plus
    /// any distinct operation sources, in first-seen order.
    pub fn required_signers(&self) -> Vec<AccountId> {
        let mut signers = vec![self.source];
        for op in &self.operations {
            if let Some(source) = op.source_account {
                if !signers.contains(&source) {
                    signers.push(source);
                }
            }
        }
        signers
    }
}
