/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Hash primitives for the audit chain.
//!
//! All hashing is SHA-256 over canonical bytes, hex-encoded lower-case.
//! A request for any other algorithm is a configuration error; there is no
//! pluggable digest seam.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::codec::canonical_bytes;
use crate::error::KernelError;

/// The only supported hash algorithm identifier.
pub const HASH_ALG_SHA256: &str = "sha256";

/// The genesis sentinel: predecessor of the first chain entry.
pub fn genesis_hash() -> String {
    "0".repeat(64)
}

/// Reject any algorithm other than `sha256`.
pub fn check_hash_alg(alg: &str) -> Result<(), KernelError> {
    if alg != HASH_ALG_SHA256 {
        return Err(KernelError::Config(format!(
            "unsupported hash algorithm: {}",
            alg
        )));
    }
    Ok(())
}

/// SHA-256 of raw bytes, hex-encoded lower-case (64 chars).
pub fn compute_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// SHA-256 of a UTF-8 string.
pub fn compute_hash_str(text: &str) -> String {
    compute_hash(text.as_bytes())
}

/// SHA-256 of the canonical serialization of a JSON value.
pub fn compute_hash_value(value: &Value) -> String {
    compute_hash(&canonical_bytes(value))
}

/// Chain link: `SHA-256(prev_hash ":" entry_data)`.
pub fn compute_chain_hash(prev_hash: &str, entry_data: &str) -> String {
    compute_hash_str(&format!("{}:{}", prev_hash, entry_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_sha256() {
        assert_eq!(
            compute_hash_str("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            compute_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_genesis_is_64_zeros() {
        let genesis = genesis_hash();
        assert_eq!(genesis.len(), 64);
        assert!(genesis.chars().all(|c| c == '0'));
    }

    #[test]
    fn test_chain_hash_known_value() {
        assert_eq!(
            compute_chain_hash(&genesis_hash(), "body"),
            "f56ca8d8f8f620089d7c005436d0d3781db7d9d5952bf24ca9eff4aee5bccf83"
        );
    }

    #[test]
    fn test_chain_hash_depends_on_prev() {
        let a = compute_chain_hash(&genesis_hash(), "body");
        let b = compute_chain_hash(&compute_hash_str("x"), "body");
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_value_key_order_irrelevant() {
        let a = json!({"a": 1, "b": 2});
        let b = json!({"b": 2, "a": 1});
        assert_eq!(compute_hash_value(&a), compute_hash_value(&b));
    }

    #[test]
    fn test_hash_is_lower_hex() {
        let h = compute_hash_str("anything");
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_check_hash_alg() {
        assert!(check_hash_alg("sha256").is_ok());
        assert!(check_hash_alg("md5").is_err());
        assert!(check_hash_alg("sha512").is_err());
        assert!(check_hash_alg("").is_err());
    }
}
