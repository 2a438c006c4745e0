/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Composable jurisdiction rules.
//!
//! Each rule checks one aspect of policy compliance and returns violation
//! messages; `evaluate_policy` runs all of them and accumulates everything
//! rather than short-circuiting, so a receipt carries the complete list of
//! reasons a request was denied.

use serde_json::Value;

use crate::codec::canonical_string;
use crate::policy::JurisdictionPolicy;
use crate::types::KernelRequest;

/// Result of evaluating a request against a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyResult {
    pub allowed: bool,
    pub violations: Vec<String>,
}

/// Actor must be admitted by the policy.
pub fn check_actor_allowed(
    request: &KernelRequest,
    policy: &JurisdictionPolicy,
) -> Vec<String> {
    if !policy.allows_actor(&request.actor) {
        return vec![format!(
            "Actor '{}' is not in allowed actors",
            request.actor
        )];
    }
    Vec::new()
}

/// When a tool call is present, its tool must be admitted by the policy.
/// An absent tool call is never a violation here; the pipeline decides what
/// intent-only requests mean for each variant.
pub fn check_tool_allowed(
    request: &KernelRequest,
    policy: &JurisdictionPolicy,
) -> Vec<String> {
    let Some(tool_call) = &request.tool_call else {
        return Vec::new();
    };
    if !policy.allows_tool(&tool_call.name) {
        return vec![format!(
            "Tool '{}' is not in allowed tools",
            tool_call.name
        )];
    }
    Vec::new()
}

/// Every field the policy names must be present and non-empty.
pub fn check_required_fields(
    request: &KernelRequest,
    policy: &JurisdictionPolicy,
) -> Vec<String> {
    let mut violations = Vec::new();
    for field in &policy.required_fields {
        let satisfied = match field.as_str() {
            "request_id" => !request.request_id.is_empty(),
            "actor" => !request.actor.is_empty(),
            "intent" => !request.intent.is_empty(),
            // ts_ms is always present by construction.
            "ts_ms" => true,
            "evidence" => request
                .evidence
                .as_ref()
                .map(|e| !e.is_empty())
                .unwrap_or(false),
            "tool_call" => request.tool_call.is_some(),
            // A field the record does not carry can never be satisfied.
            _ => false,
        };
        if !satisfied {
            violations.push(format!("Required field '{}' is missing or empty", field));
        }
    }
    violations
}

/// Canonical-serialized params must fit within the policy cap.
pub fn check_param_size(
    request: &KernelRequest,
    policy: &JurisdictionPolicy,
) -> Vec<String> {
    if request.params.is_empty() {
        return Vec::new();
    }
    let serialized = canonical_string(&Value::Object(request.params.clone()));
    let size = serialized.len();
    if size > policy.max_param_bytes {
        return vec![format!(
            "Params size ({} bytes) exceeds maximum ({} bytes)",
            size, policy.max_param_bytes
        )];
    }
    Vec::new()
}

/// Intent must fit within the policy cap.
pub fn check_intent_length(
    request: &KernelRequest,
    policy: &JurisdictionPolicy,
) -> Vec<String> {
    if request.intent.chars().count() > policy.max_intent_length {
        return vec![format!(
            "Intent length ({}) exceeds maximum ({})",
            request.intent.chars().count(),
            policy.max_intent_length
        )];
    }
    Vec::new()
}

/// When present, a tool call must carry a non-empty name.
pub fn check_tool_call_structure(request: &KernelRequest) -> Vec<String> {
    let Some(tool_call) = &request.tool_call else {
        return Vec::new();
    };
    if tool_call.name.is_empty() {
        return vec!["Tool call name is empty".to_string()];
    }
    Vec::new()
}

/// Run every rule and accumulate all violations.
pub fn evaluate_policy(request: &KernelRequest, policy: &JurisdictionPolicy) -> PolicyResult {
    let mut violations = Vec::new();
    violations.extend(check_required_fields(request, policy));
    violations.extend(check_actor_allowed(request, policy));
    violations.extend(check_tool_allowed(request, policy));
    violations.extend(check_param_size(request, policy));
    violations.extend(check_intent_length(request, policy));
    violations.extend(check_tool_call_structure(request));

    PolicyResult {
        allowed: violations.is_empty(),
        violations,
    }
}
