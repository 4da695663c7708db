//! StrKey helpers for account ids and secret seeds.

use pitoken_types::strkey::{self, VersionByte};
use pitoken_types::{AccountId, PrivateKey, PublicKey};

use crate::CryptoError;

pub fn encode_account_id(public_key: &PublicKey) -> String {
    strkey::encode(VersionByte::AccountId, public_key.as_bytes())
}

pub fn decode_account_id(encoded: &str) -> Result<AccountId, CryptoError> {
    strkey::decode(VersionByte::AccountId, encoded)
        .map(|bytes| AccountId::new(PublicKey(bytes)))
        .map_err(CryptoError::InvalidAccountId)
}

/// Render a secret seed as `S...`. The returned string is as sensitive as
/// the key itself.
pub fn encode_secret_seed(private_key: &PrivateKey) -> String {
    strkey::encode(VersionByte::SecretSeed, &private_key.0)
}

pub fn decode_secret_seed(encoded: &str) -> Result<PrivateKey, CryptoError> {
    strkey::decode(VersionByte::SecretSeed, encoded)
        .map(PrivateKey)
        .map_err(CryptoError::InvalidSecretSeed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    #[test]
    fn known_seed_renders_known_strings() {
        let kp = keypair_from_seed(&[7u8; 32]);
        assert_eq!(
            encode_account_id(&kp.public),
            "GDVEU3DD4KOFECV66VIHWEZOYX4ZKR3WV27L464SIIPOU2IUI3JCZA57"
        );
        assert_eq!(
            encode_secret_seed(&kp.private),
            "SADQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQP54X"
        );
    }

    #[test]
    fn secret_seed_decodes() {
        let private =
            decode_secret_seed("SADQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQP54X")
                .unwrap();
        assert_eq!(private.0, [7u8; 32]);
    }

    #[test]
    fn account_id_is_not_a_seed() {
        let result = decode_secret_seed("GDVEU3DD4KOFECV66VIHWEZOYX4ZKR3WV27L464SIIPOU2IUI3JCZA57");
        assert!(matches!(result, Err(CryptoError::InvalidSecretSeed(_))));
    }
}
