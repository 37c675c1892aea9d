//! Fixed-width identity encoding.
//!
//! Identities are persisted as the 56 ASCII bytes of their StrKey. Decoding
//! re-checks the StrKey checksum in the contract so corrupt account bytes
//! surface as [`CommonError::MalformedAccount`].

use soroban_sdk::{Address, Env, String};

use crate::CommonError;

/// Width of an encoded identity: the StrKey form of an account (`G…`) or
/// contract (`C…`) address.
pub const IDENTITY_LEN: usize = 56;

/// Encodes an identity as its fixed-width StrKey bytes.
pub fn identity_bytes(identity: &Address) -> Result<[u8; IDENTITY_LEN], CommonError> {
    let strkey = identity.to_string();
    if strkey.len() as usize != IDENTITY_LEN {
        return Err(CommonError::InvalidIdentity);
    }
    let mut out = [0u8; IDENTITY_LEN];
    strkey.copy_into_slice(&mut out);
    Ok(out)
}

/// Decoded StrKey: version byte, 32-byte key, 2-byte checksum.
const STRKEY_RAW_LEN: usize = 35;
const VERSION_ACCOUNT: u8 = 6 << 3;
const VERSION_CONTRACT: u8 = 2 << 3;

fn base32_value(c: u8) -> Option<u8> {
    match c {
        b'A'..=b'Z' => Some(c - b'A'),
        b'2'..=b'7' => Some(c - b'2' + 26),
        _ => None,
    }
}

/// CRC16-XModem, as used for the StrKey checksum.
fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= u16::from(*byte) << 8;
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

/// Checks alphabet, version byte and checksum of a StrKey.
fn is_valid_strkey(raw: &[u8; IDENTITY_LEN]) -> bool {
    let mut decoded = [0u8; STRKEY_RAW_LEN];
    let mut acc: u64 = 0;
    let mut bits = 0u32;
    let mut pos = 0usize;
    for c in raw {
        let Some(value) = base32_value(*c) else {
            return false;
        };
        acc = (acc << 5) | u64::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            decoded[pos] = (acc >> bits) as u8;
            pos += 1;
        }
    }

    let (body, checksum) = decoded.split_at(STRKEY_RAW_LEN - 2);
    matches!(body[0], VERSION_ACCOUNT | VERSION_CONTRACT)
        && crc16(body).to_le_bytes() == [checksum[0], checksum[1]]
}

/// Decodes fixed-width StrKey bytes back into an identity.
///
/// Bytes that are not a well-formed account or contract StrKey are rejected
/// before they reach the host, which would otherwise trap on them.
pub fn identity_from_bytes(env: &Env, raw: &[u8; IDENTITY_LEN]) -> Result<Address, CommonError> {
    if !is_valid_strkey(raw) {
        return Err(CommonError::MalformedAccount);
    }
    Ok(Address::from_string(&String::from_bytes(env, raw)))
}
