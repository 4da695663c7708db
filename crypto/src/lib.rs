//! Cryptographic primitives for pitoken.
//!
//! - **Ed25519** for signing and signature verification
//! - **SHA-256** for network ids and transaction hashes
//! - **StrKey** text forms for account ids (`G...`) and secret seeds (`S...`)

pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;
pub mod strkey;

pub use error::CryptoError;
pub use hash::{network_id, sha256, sha256_multi};
pub use keys::{
    generate_keypair, keypair_from_private, keypair_from_secret, keypair_from_seed,
    public_from_private,
};
pub use sign::{sign_message, verify_signature};
pub use strkey::{decode_account_id, decode_secret_seed, encode_account_id, encode_secret_seed};
