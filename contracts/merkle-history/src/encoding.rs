//! Fixed-width boundary encoding for field elements.
//!
//! Values cross contract and client boundaries as 32 big-endian bytes,
//! left-padded with zeros, so byte comparisons match numeric comparisons.

use soroban_sdk::{Bytes, BytesN, Env, U256};

/// Canonical width of an encoded field element.
pub const FIELD_BYTES: usize = 32;

pub fn to_fixed_bytes(env: &Env, value: &U256) -> BytesN<32> {
    let mut out = [0u8; FIELD_BYTES];
    value.to_be_bytes().copy_into_slice(&mut out);
    BytesN::from_array(env, &out)
}

pub fn from_fixed_bytes(env: &Env, bytes: &BytesN<32>) -> U256 {
    U256::from_be_bytes(env, &Bytes::from(bytes.clone()))
}
