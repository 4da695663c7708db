//! Signed transaction envelopes.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pitoken_crypto::{sign_message, verify_signature};
use pitoken_types::{AccountId, KeyPair, NetworkId, PublicKey, Signature, TxHash};
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;
use crate::transaction::Transaction;
use crate::xdr;

/// At most this many signatures fit in one envelope.
pub const MAX_SIGNATURES: usize = 20;

/// A signature together with the last four bytes of the signer's key, which
/// lets the network find the matching signer without trying every key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    pub hint: [u8; 4],
    #[serde(with = "signature_hex")]
    pub signature: Signature,
}

impl DecoratedSignature {
    /// Whether this signature was made by `key` over `hash`.
    pub fn is_valid_for(&self, key: &PublicKey, hash: &TxHash) -> bool {
        self.hint == key.signature_hint() && verify_signature(hash.as_bytes(), &self.signature, key)
    }
}

/// A transaction plus its signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl TransactionEnvelope {
    pub fn new(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: Vec::new(),
        }
    }

    /// Sign the transaction hash for `network` and append the signature.
    ///
    /// Signing twice with the same key is a no-op.
    pub fn sign(&mut self, keypair: &KeyPair, network: &NetworkId) -> Result<(), TransactionError> {
        let hash = self.tx.hash(network);
        if self
            .signatures
            .iter()
            .any(|sig| sig.is_valid_for(&keypair.public, &hash))
        {
            return Ok(());
        }
        if self.signatures.len() >= MAX_SIGNATURES {
            return Err(TransactionError::TooManySignatures(self.signatures.len()));
        }
        self.signatures.push(DecoratedSignature {
            hint: keypair.public.signature_hint(),
            signature: sign_message(hash.as_bytes(), &keypair.private),
        });
        Ok(())
    }

    pub fn hash(&self, network: &NetworkId) -> TxHash {
        self.tx.hash(network)
    }

    /// Whether `account` has a valid signature on this envelope for `network`.
    pub fn is_signed_by(&self, account: &AccountId, network: &NetworkId) -> bool {
        let hash = self.hash(network);
        self.signatures
            .iter()
            .any(|sig| sig.is_valid_for(account.public_key(), &hash))
    }

    /// Required signers with no valid signature on `network`.
    pub fn missing_signers(&self, network: &NetworkId) -> Vec<AccountId> {
        self.tx
            .required_signers()
            .into_iter()
            .filter(|account| !self.is_signed_by(account, network))
            .collect()
    }

    pub fn to_xdr(&self) -> Vec<u8> {
        xdr::encode_envelope(self)
    }

    /// Base64 of the XDR envelope: the `tx` form field of a submission.
    pub fn to_xdr_base64(&self) -> String {
        BASE64.encode(self.to_xdr())
    }
}

mod signature_hex {
    use pitoken_types::Signature;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(sig: &Signature, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(sig.as_bytes()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Signature, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let bytes: [u8; 64] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("signature must be 64 bytes"))?;
        Ok(Signature(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::Memo;
    use crate::ChangeTrustOp;
    use pitoken_crypto::keypair_from_seed;
    use pitoken_types::{Asset, AssetCode, TimeBounds};

    fn trust_tx(source: AccountId, issuer: AccountId) -> Transaction {
        Transaction {
            source,
            fee: 100,
            sequence: 2,
            time_bounds: Some(TimeBounds {
                min_time: 0,
                max_time: 1_700_000_000,
            }),
            memo: Memo::None,
            operations: vec![ChangeTrustOp::unlimited(Asset::credit(
                AssetCode::new("TST").unwrap(),
                issuer,
            ))
            .into()],
        }
    }

    #[test]
    fn signature_verifies_on_its_network_only() {
        let holder = keypair_from_seed(&[7u8; 32]);
        let issuer = keypair_from_seed(&[9u8; 32]);
        let mut env = TransactionEnvelope::new(trust_tx(holder.account_id(), issuer.account_id()));
        env.sign(&holder, &NetworkId::PiTestnet).unwrap();

        assert_eq!(env.signatures.len(), 1);
        assert_eq!(env.signatures[0].hint, holder.public.signature_hint());
        assert!(env.is_signed_by(&holder.account_id(), &NetworkId::PiTestnet));
        assert!(!env.is_signed_by(&holder.account_id(), &NetworkId::PiMainnet));
        assert!(env.missing_signers(&NetworkId::PiTestnet).is_empty());
    }

    #[test]
    fn signing_twice_with_same_key_is_idempotent() {
        let holder = keypair_from_seed(&[7u8; 32]);
        let issuer = keypair_from_seed(&[9u8; 32]);
        let mut env = TransactionEnvelope::new(trust_tx(holder.account_id(), issuer.account_id()));
        env.sign(&holder, &NetworkId::PiTestnet).unwrap();
        env.sign(&holder, &NetworkId::PiTestnet).unwrap();
        assert_eq!(env.signatures.len(), 1);
    }

    #[test]
    fn wrong_key_leaves_source_missing() {
        let holder = keypair_from_seed(&[7u8; 32]);
        let issuer = keypair_from_seed(&[9u8; 32]);
        let mut env = TransactionEnvelope::new(trust_tx(holder.account_id(), issuer.account_id()));
        env.sign(&issuer, &NetworkId::PiTestnet).unwrap();
        assert_eq!(
            env.missing_signers(&NetworkId::PiTestnet),
            vec![holder.account_id()]
        );
    }

    #[test]
    fn signature_count_is_capped() {
        let holder = keypair_from_seed(&[7u8; 32]);
        let issuer = keypair_from_seed(&[9u8; 32]);
        let mut env = TransactionEnvelope::new(trust_tx(holder.account_id(), issuer.account_id()));
        for i in 0..MAX_SIGNATURES {
            env.sign(&keypair_from_seed(&[i as u8 + 20; 32]), &NetworkId::PiTestnet)
                .unwrap();
        }
        assert_eq!(
            env.sign(&holder, &NetworkId::PiTestnet),
            Err(TransactionError::TooManySignatures(MAX_SIGNATURES))
        );
    }

    #[test]
    fn serde_round_trip() {
        let holder = keypair_from_seed(&[7u8; 32]);
        let issuer = keypair_from_seed(&[9u8; 32]);
        let mut env = TransactionEnvelope::new(trust_tx(holder.account_id(), issuer.account_id()));
        env.sign(&holder, &NetworkId::PiTestnet).unwrap();
        let json = serde_json::to_string(&env).unwrap();
        let back: TransactionEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }
}
