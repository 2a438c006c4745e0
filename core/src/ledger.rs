/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Hash-chained audit ledger.
//!
//! Every decision the kernel makes is appended here. Each entry's hash
//! covers its own canonical body concatenated with the previous entry's
//! hash, forming a tamper-evident chain. The ledger feeds the evidence
//! bundles the GCD (Governance, Compliance, Diagnostics) tooling verifies
//! offline.
//!
//! Append-only: entries are never removed or mutated, and the outside world
//! only ever sees copies.

use serde_json::Value;

use crate::codec::{serialize_for_audit, AuditBody};
use crate::error::KernelError;
use crate::hashing::{compute_chain_hash, genesis_hash};
use crate::types::{AuditEntry, Decision, EvidenceBundle, KernelState};

/// Inputs for one ledger append. The ledger derives the chain fields.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub request_id: String,
    pub actor: String,
    pub intent: String,
    pub decision: Decision,
    pub state_from: KernelState,
    pub state_to: KernelState,
    pub ts_ms: i64,
    pub tool_name: Option<String>,
    pub params_hash: Option<String>,
    pub evidence_hash: Option<String>,
    pub error: Option<String>,
}

impl AuditRecord {
    /// Record with the mandatory fields set and all optionals empty.
    pub fn new(
        request_id: impl Into<String>,
        actor: impl Into<String>,
        intent: impl Into<String>,
        decision: Decision,
        state_from: KernelState,
        state_to: KernelState,
        ts_ms: i64,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            actor: actor.into(),
            intent: intent.into(),
            decision,
            state_from,
            state_to,
            ts_ms,
            tool_name: None,
            params_hash: None,
            evidence_hash: None,
            error: None,
        }
    }
}

/// Append-only, hash-chained audit ledger owned by one kernel.
#[derive(Debug, Clone)]
pub struct AuditLedger {
    kernel_id: String,
    variant: String,
    entries: Vec<AuditEntry>,
    root: String,
}

impl AuditLedger {
    /// New empty ledger. The root hash starts at the genesis sentinel.
    pub fn new(kernel_id: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            kernel_id: kernel_id.into(),
            variant: variant.into(),
            entries: Vec::new(),
            root: genesis_hash(),
        }
    }

    pub fn kernel_id(&self) -> &str {
        &self.kernel_id
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hash of the last entry, or genesis when empty.
    pub fn root_hash(&self) -> &str {
        &self.root
    }

    /// Read-only view of the entries.
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Deep copy of the entries; later appends are invisible to the caller.
    pub fn snapshot(&self) -> Vec<AuditEntry> {
        self.entries.clone()
    }

    /// Append a record, chaining it onto the current root.
    pub fn append(&mut self, record: AuditRecord) -> &AuditEntry {
        let prev_hash = self.root.clone();
        let body = serialize_for_audit(&AuditBody {
            prev_hash: &prev_hash,
            ts_ms: record.ts_ms,
            request_id: &record.request_id,
            actor: &record.actor,
            intent: &record.intent,
            decision: record.decision.as_str(),
            state_from: record.state_from.as_str(),
            state_to: record.state_to.as_str(),
            tool_name: record.tool_name.as_deref(),
            params_hash: record.params_hash.as_deref(),
            evidence_hash: record.evidence_hash.as_deref(),
            error: record.error.as_deref(),
        });
        let entry_hash = compute_chain_hash(&prev_hash, &body);

        self.entries.push(AuditEntry {
            prev_hash,
            entry_hash: entry_hash.clone(),
            ts_ms: record.ts_ms,
            request_id: record.request_id,
            actor: record.actor,
            intent: record.intent,
            decision: record.decision,
            state_from: record.state_from,
            state_to: record.state_to,
            tool_name: record.tool_name,
            params_hash: record.params_hash,
            evidence_hash: record.evidence_hash,
            error: record.error,
            permit_digest: None,
            permit_verification: None,
            permit_denial_reasons: Vec::new(),
            proposal_hash: None,
        });
        self.root = entry_hash;
        // Just pushed; the vector cannot be empty.
        &self.entries[self.entries.len() - 1]
    }

    /// Entries as JSON values, the shape the replay verifier consumes.
    pub fn to_values(&self) -> Result<Vec<Value>, KernelError> {
        self.entries
            .iter()
            .map(|entry| {
                serde_json::to_value(entry).map_err(|e| KernelError::Audit(e.to_string()))
            })
            .collect()
    }

    /// Freeze the ledger into an evidence bundle stamped at `exported_at_ms`.
    pub fn export(&self, exported_at_ms: i64) -> EvidenceBundle {
        EvidenceBundle {
            kernel_id: self.kernel_id.clone(),
            variant: self.variant.clone(),
            exported_at_ms,
            root_hash: self.root.clone(),
            ledger_entries: self.snapshot(),
        }
    }
}
