/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Replay verification for exported ledgers.
//!
//! A verifier with nothing but a serialized ledger (and optionally the
//! expected root hash) recomputes the whole chain with the same canonical
//! codec the kernel used. Two chains are tracked side by side: the chain the
//! ledger *claims* (stored entry hashes), so every downstream entry is still
//! checked after a mismatch, and the chain as *recomputed*, so a tampered
//! entry also surfaces as a prev-hash break on its successor.

use serde_json::Value;

use crate::codec::{serialize_for_audit, AuditBody};
use crate::hashing::{compute_chain_hash, genesis_hash};

/// Result of a replay verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub is_valid: bool,
    pub entries_verified: usize,
    pub errors: Vec<String>,
    pub computed_root_hash: String,
}

fn field_str<'a>(entry: &'a Value, key: &str) -> &'a str {
    entry.get(key).and_then(Value::as_str).unwrap_or("")
}

fn field_opt_str<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    match entry.get(key) {
        None | Some(Value::Null) => None,
        Some(v) => v.as_str(),
    }
}

fn field_i64(entry: &Value, key: &str) -> i64 {
    entry.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn short(hash: &str) -> String {
    hash.chars().take(16).collect()
}

/// Replay a sequence of entry values and verify the hash chain.
///
/// Returns `(is_valid, errors)`. Empty input is trivially valid.
pub fn replay_and_verify(
    entries: &[Value],
    expected_root_hash: Option<&str>,
) -> (bool, Vec<String>) {
    let mut errors = Vec::new();

    if entries.is_empty() {
        if let Some(expected) = expected_root_hash {
            if expected != genesis_hash() {
                errors.push(format!(
                    "Root hash mismatch. Computed {}..., expected {}...",
                    short(&genesis_hash()),
                    short(expected)
                ));
            }
        }
        return (errors.is_empty(), errors);
    }

    let mut prev_claimed = genesis_hash();
    let mut prev_computed = genesis_hash();

    for (i, entry) in entries.iter().enumerate() {
        let entry_prev_hash = field_str(entry, "prev_hash");
        if entry_prev_hash != prev_claimed {
            errors.push(format!(
                "Entry {}: prev_hash mismatch. Expected {}..., got {}...",
                i,
                short(&prev_claimed),
                short(entry_prev_hash)
            ));
        } else if entry_prev_hash != prev_computed {
            // The claimed chain is intact here, but the recomputed chain
            // diverged upstream: this entry links to a tampered predecessor.
            errors.push(format!(
                "Entry {}: prev_hash mismatch. Expected {}..., got {}...",
                i,
                short(&prev_computed),
                short(entry_prev_hash)
            ));
        }

        let body = serialize_for_audit(&AuditBody {
            prev_hash: entry_prev_hash,
            ts_ms: field_i64(entry, "ts_ms"),
            request_id: field_str(entry, "request_id"),
            actor: field_str(entry, "actor"),
            intent: field_str(entry, "intent"),
            decision: field_str(entry, "decision"),
            state_from: field_str(entry, "state_from"),
            state_to: field_str(entry, "state_to"),
            tool_name: field_opt_str(entry, "tool_name"),
            params_hash: field_opt_str(entry, "params_hash"),
            evidence_hash: field_opt_str(entry, "evidence_hash"),
            error: field_opt_str(entry, "error"),
        });

        let computed = compute_chain_hash(&prev_claimed, &body);
        let entry_hash = field_str(entry, "entry_hash");

        if computed != entry_hash {
            errors.push(format!(
                "Entry {}: entry_hash mismatch. Computed {}..., got {}...",
                i,
                short(&computed),
                short(entry_hash)
            ));
        }

        // Follow the claimed chain so downstream entries are checked against
        // what the ledger says; track the recomputed chain separately.
        prev_claimed = entry_hash.to_string();
        prev_computed = computed;
    }

    if let Some(expected) = expected_root_hash {
        if prev_claimed != expected {
            errors.push(format!(
                "Root hash mismatch. Computed {}..., expected {}...",
                short(&prev_claimed),
                short(expected)
            ));
        }
    }

    (errors.is_empty(), errors)
}

/// Verify a full evidence bundle value.
pub fn verify_evidence_bundle(bundle: &Value) -> ReplayResult {
    let empty = Vec::new();
    let entries = bundle
        .get("ledger_entries")
        .and_then(Value::as_array)
        .unwrap_or(&empty);
    let expected_root = bundle.get("root_hash").and_then(Value::as_str);

    let (is_valid, errors) = replay_and_verify(entries, expected_root);

    let computed_root = entries
        .last()
        .map(|entry| field_str(entry, "entry_hash").to_string())
        .unwrap_or_else(genesis_hash);

    ReplayResult {
        is_valid,
        entries_verified: entries.len(),
        errors,
        computed_root_hash: computed_root,
    }
}
