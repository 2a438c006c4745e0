/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Kernel variants.
//!
//! A variant is not a different kernel; it is a configuration of the same
//! pipeline: the policy it installs plus one pure variant check that runs
//! during arbitration. The wire identifiers below are stable; they appear
//! in ledger headers and evidence bundles.
//!
//! - `strict`: no extra check; strictness comes from its policy (no
//!   intent-only requests, full ambiguity heuristics).
//! - `permissive`: wildcards, intent-only allowed, larger intent cap,
//!   relaxed ambiguity heuristics.
//! - `evidence-first`: denies any request without non-whitespace evidence.
//! - `dual-channel`: denies any request without a constraints mapping
//!   carrying non-empty `scope`, `non_goals` and `success_criteria`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::KernelError;
use crate::policy::JurisdictionPolicy;
use crate::types::{KernelConfig, KernelRequest};

/// Intent cap installed by the permissive variant.
pub const PERMISSIVE_MAX_INTENT_LENGTH: usize = 8192;

/// Constraint keys the dual-channel variant requires.
pub const REQUIRED_CONSTRAINT_KEYS: [&str; 3] = ["scope", "non_goals", "success_criteria"];

/// A named configuration of the kernel pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[serde(rename = "strict")]
    Strict,
    #[serde(rename = "permissive")]
    Permissive,
    #[serde(rename = "evidence-first")]
    EvidenceFirst,
    #[serde(rename = "dual-channel")]
    DualChannel,
}

impl Variant {
    /// Stable wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Strict => "strict",
            Variant::Permissive => "permissive",
            Variant::EvidenceFirst => "evidence-first",
            Variant::DualChannel => "dual-channel",
        }
    }

    /// All variants, for enumeration in tooling.
    pub fn all() -> [Variant; 4] {
        [
            Variant::Strict,
            Variant::Permissive,
            Variant::EvidenceFirst,
            Variant::DualChannel,
        ]
    }

    /// Whether the full ambiguity heuristic set applies.
    pub fn strict_ambiguity(&self) -> bool {
        !matches!(self, Variant::Permissive)
    }

    /// The jurisdiction policy this variant installs at boot.
    pub fn policy(&self, config: &KernelConfig) -> JurisdictionPolicy {
        let base = JurisdictionPolicy {
            max_param_bytes: config.max_param_bytes,
            max_intent_length: config.max_intent_length,
            ..JurisdictionPolicy::open()
        };
        match self {
            Variant::Strict => base,
            Variant::Permissive => JurisdictionPolicy {
                allow_intent_only: true,
                max_intent_length: PERMISSIVE_MAX_INTENT_LENGTH,
                ..base
            },
            Variant::EvidenceFirst => JurisdictionPolicy {
                allow_intent_only: true,
                ..base
            },
            Variant::DualChannel => JurisdictionPolicy {
                allow_intent_only: true,
                ..base
            },
        }
    }

    /// The variant check: a pure function of the request, run during
    /// arbitration, whose violations merge with the evaluator's.
    pub fn check(&self, request: &KernelRequest) -> Vec<String> {
        match self {
            Variant::Strict | Variant::Permissive => Vec::new(),
            Variant::EvidenceFirst => check_evidence(request),
            Variant::DualChannel => check_constraints(request),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Variant::Strict),
            "permissive" => Ok(Variant::Permissive),
            "evidence-first" => Ok(Variant::EvidenceFirst),
            "dual-channel" => Ok(Variant::DualChannel),
            other => Err(KernelError::Config(format!("unknown variant: {}", other))),
        }
    }
}

fn check_evidence(request: &KernelRequest) -> Vec<String> {
    match &request.evidence {
        None => vec!["Evidence field is required for this kernel variant".to_string()],
        Some(evidence) if evidence.trim().is_empty() => {
            vec!["Evidence field cannot be empty".to_string()]
        }
        Some(_) => Vec::new(),
    }
}

fn check_constraints(request: &KernelRequest) -> Vec<String> {
    // Constraints travel inside params; the dedicated request field is an
    // accepted fallback for callers that keep params purely tool-shaped.
    let constraints: Option<&Map<String, Value>> = match request.params.get("constraints") {
        Some(Value::Object(map)) => Some(map),
        Some(_) => return vec!["Constraints must be a dictionary".to_string()],
        None => request.constraints.as_ref(),
    };

    let Some(constraints) = constraints else {
        return vec!["Constraints dict is required in params".to_string()];
    };

    let mut errors = Vec::new();

    let missing: Vec<&str> = REQUIRED_CONSTRAINT_KEYS
        .iter()
        .filter(|key| !constraints.contains_key(**key))
        .copied()
        .collect();
    if !missing.is_empty() {
        let mut sorted = missing.clone();
        sorted.sort_unstable();
        errors.push(format!(
            "Missing required constraint keys: {}",
            sorted.join(", ")
        ));
    }

    for key in REQUIRED_CONSTRAINT_KEYS {
        if let Some(value) = constraints.get(key) {
            match value {
                Value::String(s) if !s.trim().is_empty() => {}
                _ => errors.push(format!("Constraint '{}' cannot be empty", key)),
            }
        }
    }

    errors
}
