//! StrKey: the printable form of account ids (`G...`) and secret seeds (`S...`).
//!
//! Layout: base32(version ‖ payload ‖ crc16), where the version byte selects
//! the key kind, the payload is the 32 raw key bytes and the checksum is
//! CRC16-XModem over version ‖ payload, stored little-endian.
//! Base32 is the RFC 4648 alphabet without padding; 35 bytes encode to
//! exactly 56 characters.

use thiserror::Error;

/// RFC 4648 base32 alphabet.
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Raw length: 1 version byte + 32 payload bytes + 2 checksum bytes.
const RAW_LEN: usize = 35;
/// Encoded length of every 32-byte StrKey.
pub const ENCODED_LEN: usize = 56;

/// Kind of key carried by a StrKey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionByte {
    /// Ed25519 public key, renders with a leading `G`.
    AccountId = 6 << 3,
    /// Ed25519 secret seed, renders with a leading `S`.
    SecretSeed = 18 << 3,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrKeyError {
    #[error("expected {ENCODED_LEN} characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid base32 character {0:?}")]
    InvalidCharacter(char),

    #[error("unexpected version byte {found:#04x}, expected {expected:#04x}")]
    WrongVersion { expected: u8, found: u8 },

    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// Encode a 32-byte key under the given version byte.
pub fn encode(version: VersionByte, payload: &[u8; 32]) -> String {
    let mut raw = [0u8; RAW_LEN];
    raw[0] = version as u8;
    raw[1..33].copy_from_slice(payload);
    let crc = crc16_xmodem(&raw[..33]);
    raw[33..].copy_from_slice(&crc.to_le_bytes());
    encode_base32(&raw)
}

/// Decode a StrKey, checking length, alphabet, version byte and checksum.
pub fn decode(version: VersionByte, encoded: &str) -> Result<[u8; 32], StrKeyError> {
    if encoded.len() != ENCODED_LEN {
        return Err(StrKeyError::InvalidLength(encoded.len()));
    }
    let raw = decode_base32(encoded)?;

    if raw[0] != version as u8 {
        return Err(StrKeyError::WrongVersion {
            expected: version as u8,
            found: raw[0],
        });
    }

    let expected = crc16_xmodem(&raw[..33]).to_le_bytes();
    if raw[33..] != expected {
        return Err(StrKeyError::ChecksumMismatch);
    }

    let mut payload = [0u8; 32];
    payload.copy_from_slice(&raw[1..33]);
    Ok(payload)
}

/// CRC16-XModem: polynomial 0x1021, initial value 0, no reflection.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn encode_base32(bytes: &[u8; RAW_LEN]) -> String {
    let mut result = String::with_capacity(ENCODED_LEN);
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    // 280 bits divide evenly into 5-bit groups.
    debug_assert_eq!(bits_in_buffer, 0);

    result
}

fn decode_base32(s: &str) -> Result<[u8; RAW_LEN], StrKeyError> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; RAW_LEN];
    let mut pos = 0;

    for c in s.chars() {
        let val = if c.is_ascii() {
            BASE32_DECODE[c as usize]
        } else {
            0xFF
        };
        if val == 0xFF {
            return Err(StrKeyError::InvalidCharacter(c));
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < RAW_LEN {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    if pos < RAW_LEN {
        return Err(StrKeyError::InvalidLength(s.len()));
    }
    Ok(result)
}
