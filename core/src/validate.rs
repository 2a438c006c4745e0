/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Structural request validation and ambiguity heuristics.
//!
//! Validation catches malformed requests before arbitration. The ambiguity
//! heuristics catch requests that are well-formed but cannot be interpreted
//! unambiguously; the kernel denies those rather than guessing. Strict
//! variants apply the full heuristic set, relaxed variants only the
//! intent-length cap.

use serde_json::Value;

use crate::codec::canonical_string;
use crate::types::{KernelRequest, ToolCall};

/// Validate the structure of a request. Empty list means valid.
pub fn validate_request(request: &KernelRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if request.request_id.is_empty() {
        errors.push("request_id is required".to_string());
    }
    if request.ts_ms < 0 {
        errors.push("ts_ms must be non-negative".to_string());
    }
    if request.actor.is_empty() {
        errors.push("actor is required".to_string());
    }
    if let Some(tool_call) = &request.tool_call {
        errors.extend(validate_tool_call(tool_call));
    }

    errors
}

/// Validate the structure of a tool call.
pub fn validate_tool_call(tool_call: &ToolCall) -> Vec<String> {
    let mut errors = Vec::new();
    if tool_call.name.is_empty() {
        errors.push("tool_call.name cannot be empty".to_string());
    }
    errors
}

/// Check a request for ambiguity indicators.
///
/// An empty or whitespace-only intent is always ambiguous. Overly long
/// intents are ambiguous. In strict mode, a tool call with an empty name is
/// ambiguous too.
pub fn check_ambiguity(
    request: &KernelRequest,
    max_intent_length: usize,
    strict: bool,
) -> Vec<String> {
    let mut errors = Vec::new();

    if request.intent.trim().is_empty() {
        errors.push("Empty intent is ambiguous".to_string());
    }

    if request.intent.chars().count() > max_intent_length {
        errors.push(format!(
            "Intent exceeds maximum length of {}",
            max_intent_length
        ));
    }

    if strict {
        if let Some(tool_call) = &request.tool_call {
            if tool_call.name.is_empty() {
                errors.push("Tool call with empty name is ambiguous".to_string());
            }
        }
    }

    errors
}

/// True when the canonical serialization of `params` fits in `max_bytes`.
pub fn check_param_size(params: &serde_json::Map<String, Value>, max_bytes: usize) -> bool {
    canonical_string(&Value::Object(params.clone())).len() <= max_bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_valid_request_passes() {
        let request = KernelRequest::new("r1", 1000, "alice", "do the thing");
        assert!(validate_request(&request).is_empty());
    }

    #[test]
    fn test_empty_request_id() {
        let request = KernelRequest::new("", 1000, "alice", "x");
        let errors = validate_request(&request);
        assert_eq!(errors, vec!["request_id is required".to_string()]);
    }

    #[test]
    fn test_negative_ts() {
        let request = KernelRequest::new("r1", -1, "alice", "x");
        let errors = validate_request(&request);
        assert_eq!(errors, vec!["ts_ms must be non-negative".to_string()]);
    }

    #[test]
    fn test_empty_actor() {
        let request = KernelRequest::new("r1", 1000, "", "x");
        let errors = validate_request(&request);
        assert_eq!(errors, vec!["actor is required".to_string()]);
    }

    #[test]
    fn test_tool_call_empty_name_is_structural() {
        let mut request = KernelRequest::new("r1", 1000, "alice", "x");
        request.tool_call = Some(ToolCall::new("", Map::new()));
        let errors = validate_request(&request);
        assert_eq!(errors, vec!["tool_call.name cannot be empty".to_string()]);
    }

    #[test]
    fn test_multiple_structural_errors() {
        let request = KernelRequest::new("", -5, "", "x");
        assert_eq!(validate_request(&request).len(), 3);
    }

    #[test]
    fn test_empty_intent_is_ambiguous() {
        let request = KernelRequest::new("r1", 1000, "alice", "");
        let errors = check_ambiguity(&request, 4096, true);
        assert_eq!(errors, vec!["Empty intent is ambiguous".to_string()]);
    }

    #[test]
    fn test_whitespace_intent_is_ambiguous() {
        let request = KernelRequest::new("r1", 1000, "alice", "   \t ");
        let errors = check_ambiguity(&request, 4096, false);
        assert_eq!(errors, vec!["Empty intent is ambiguous".to_string()]);
    }

    #[test]
    fn test_long_intent_is_ambiguous() {
        let request = KernelRequest::new("r1", 1000, "alice", "x".repeat(50));
        let errors = check_ambiguity(&request, 10, true);
        assert_eq!(
            errors,
            vec!["Intent exceeds maximum length of 10".to_string()]
        );
    }

    #[test]
    fn test_empty_tool_name_only_in_strict() {
        let mut request = KernelRequest::new("r1", 1000, "alice", "run it");
        request.tool_call = Some(ToolCall::new("", Map::new()));
        assert_eq!(
            check_ambiguity(&request, 4096, true),
            vec!["Tool call with empty name is ambiguous".to_string()]
        );
        assert!(check_ambiguity(&request, 4096, false).is_empty());
    }

    #[test]
    fn test_unambiguous_request() {
        let request = KernelRequest::new("r1", 1000, "alice", "echo the text");
        assert!(check_ambiguity(&request, 4096, true).is_empty());
    }

    #[test]
    fn test_param_size_check() {
        let mut params = Map::new();
        params.insert("k".into(), json!("v"));
        assert!(check_param_size(&params, 1024));
        assert!(!check_param_size(&params, 4));
    }
}
