/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Core record types for the arbiter kernel.
//!
//! Requests, receipts, audit entries and evidence bundles are value objects:
//! constructed once, passed by value across the kernel boundary, never
//! mutated. Enum wire names are the upper-case variant names and are stable:
//! they are hashed into the audit chain.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::clock::VirtualClock;
use crate::error::KernelError;
use crate::hashing::HASH_ALG_SHA256;
use crate::variants::Variant;

/// Default cap on canonical-serialized request params.
pub const DEFAULT_MAX_PARAM_BYTES: usize = 65536;

/// Default cap on intent length.
pub const DEFAULT_MAX_INTENT_LENGTH: usize = 4096;

/// States of the kernel state machine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum KernelState {
    Booting,
    Idle,
    Validating,
    Arbitrating,
    Executing,
    Auditing,
    Halted,
}

impl KernelState {
    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            KernelState::Booting => "BOOTING",
            KernelState::Idle => "IDLE",
            KernelState::Validating => "VALIDATING",
            KernelState::Arbitrating => "ARBITRATING",
            KernelState::Executing => "EXECUTING",
            KernelState::Auditing => "AUDITING",
            KernelState::Halted => "HALTED",
        }
    }
}

impl fmt::Display for KernelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KernelState {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOTING" => Ok(KernelState::Booting),
            "IDLE" => Ok(KernelState::Idle),
            "VALIDATING" => Ok(KernelState::Validating),
            "ARBITRATING" => Ok(KernelState::Arbitrating),
            "EXECUTING" => Ok(KernelState::Executing),
            "AUDITING" => Ok(KernelState::Auditing),
            "HALTED" => Ok(KernelState::Halted),
            other => Err(KernelError::Config(format!("unknown state: {}", other))),
        }
    }
}

/// Outcome of arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Allow,
    Deny,
    Halt,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "ALLOW",
            Decision::Deny => "DENY",
            Decision::Halt => "HALT",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALLOW" => Ok(Decision::Allow),
            "DENY" => Ok(Decision::Deny),
            "HALT" => Ok(Decision::Halt),
            other => Err(KernelError::Config(format!("unknown decision: {}", other))),
        }
    }
}

/// Status of a receipt.
///
/// ACCEPTED means ALLOW with no execution error; REJECTED means DENY;
/// FAILED means ALLOW but the execution raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReceiptStatus {
    Accepted,
    Rejected,
    Failed,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptStatus::Accepted => "ACCEPTED",
            ReceiptStatus::Rejected => "REJECTED",
            ReceiptStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specification of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// A request submitted to the kernel for arbitration.
///
/// Request ids are not required to be unique; two submissions with the same
/// id are two distinct events in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelRequest {
    pub request_id: String,
    pub ts_ms: i64,
    pub actor: String,
    pub intent: String,
    #[serde(default)]
    pub tool_call: Option<ToolCall>,
    #[serde(default)]
    pub params: Map<String, Value>,
    #[serde(default)]
    pub evidence: Option<String>,
    #[serde(default)]
    pub constraints: Option<Map<String, Value>>,
}

impl KernelRequest {
    /// Build a request with the four mandatory fields; optionals empty.
    pub fn new(
        request_id: impl Into<String>,
        ts_ms: i64,
        actor: impl Into<String>,
        intent: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            ts_ms,
            actor: actor.into(),
            intent: intent.into(),
            tool_call: None,
            params: Map::new(),
            evidence: None,
            constraints: None,
        }
    }
}

/// Receipt returned by the kernel after processing a request.
///
/// `state_from`/`state_to` record the observable transition around the
/// request, not the internal pipeline states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelReceipt {
    pub request_id: String,
    pub status: ReceiptStatus,
    pub state_from: KernelState,
    pub state_to: KernelState,
    pub ts_ms: i64,
    pub decision: Decision,
    pub error: Option<String>,
    pub evidence_hash: Option<String>,
    pub tool_result: Option<Value>,
}

/// One entry in the append-only audit ledger.
///
/// The permit fields are reserved for an external authorization issuer: the
/// core never produces them, but serializes them if supplied. They are not
/// part of the hashed body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub prev_hash: String,
    pub entry_hash: String,
    pub ts_ms: i64,
    pub request_id: String,
    pub actor: String,
    pub intent: String,
    pub decision: Decision,
    pub state_from: KernelState,
    pub state_to: KernelState,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub params_hash: Option<String>,
    #[serde(default)]
    pub evidence_hash: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub permit_digest: Option<String>,
    #[serde(default)]
    pub permit_verification: Option<String>,
    #[serde(default)]
    pub permit_denial_reasons: Vec<String>,
    #[serde(default)]
    pub proposal_hash: Option<String>,
}

/// Exportable evidence bundle: a frozen ledger snapshot plus the metadata a
/// disinterested verifier needs to recompute the chain offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub kernel_id: String,
    pub variant: String,
    pub exported_at_ms: i64,
    pub root_hash: String,
    pub ledger_entries: Vec<AuditEntry>,
}

impl EvidenceBundle {
    /// The bundle as a JSON value (all optional fields explicit `null`).
    pub fn to_value(&self) -> Result<Value, KernelError> {
        serde_json::to_value(self).map_err(|e| KernelError::Audit(e.to_string()))
    }

    /// Canonical JSON for the bundle. Two identically driven kernels export
    /// byte-identical canonical bundles.
    pub fn canonical_json(&self) -> Result<String, KernelError> {
        Ok(crate::codec::canonical_string(&self.to_value()?))
    }
}

/// Configuration for a kernel instance.
///
/// `fail_closed` is forced true at boot regardless of what the caller set.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    pub kernel_id: String,
    pub variant: Variant,
    pub fail_closed: bool,
    pub require_jurisdiction: bool,
    pub require_audit: bool,
    pub clock: VirtualClock,
    pub hash_alg: String,
    pub max_param_bytes: usize,
    pub max_intent_length: usize,
    /// Append a denial entry for submits that arrive after halt. Off by
    /// default; post-halt submits short-circuit without touching the ledger.
    pub audit_halted_denials: bool,
}

impl KernelConfig {
    /// Configuration with defaults for the given kernel id and variant.
    pub fn new(kernel_id: impl Into<String>, variant: Variant) -> Self {
        Self {
            kernel_id: kernel_id.into(),
            variant,
            fail_closed: true,
            require_jurisdiction: true,
            require_audit: true,
            clock: VirtualClock::default(),
            hash_alg: HASH_ALG_SHA256.to_string(),
            max_param_bytes: DEFAULT_MAX_PARAM_BYTES,
            max_intent_length: DEFAULT_MAX_INTENT_LENGTH,
            audit_halted_denials: false,
        }
    }

    /// Same configuration with a specific starting clock.
    pub fn with_clock(mut self, clock: VirtualClock) -> Self {
        self.clock = clock;
        self
    }
}
