/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Jurisdiction policy: the boundaries within which requests are allowed.
//!
//! A policy is immutable after construction. Actor and tool sets are
//! wildcard-aware: a literal `"*"` member admits any value. Requests that
//! fall outside the policy are denied during arbitration.

use serde_json::Value;
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::KernelError;
use crate::types::{KernelState, DEFAULT_MAX_INTENT_LENGTH, DEFAULT_MAX_PARAM_BYTES};

/// The wildcard member admitting any actor or tool.
pub const WILDCARD: &str = "*";

/// Policy defining allowed actors, tools, states and size caps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionPolicy {
    pub allowed_actors: BTreeSet<String>,
    pub allowed_tools: BTreeSet<String>,
    pub allowed_states: BTreeSet<KernelState>,
    pub required_fields: BTreeSet<String>,
    pub max_param_bytes: usize,
    pub max_intent_length: usize,
    pub allow_intent_only: bool,
}

fn operational_states() -> BTreeSet<KernelState> {
    BTreeSet::from([
        KernelState::Idle,
        KernelState::Validating,
        KernelState::Arbitrating,
        KernelState::Executing,
        KernelState::Auditing,
    ])
}

fn default_required_fields() -> BTreeSet<String> {
    BTreeSet::from([
        "request_id".to_string(),
        "actor".to_string(),
        "intent".to_string(),
    ])
}

impl Default for JurisdictionPolicy {
    /// Empty allowlists: denies every actor and tool until configured.
    fn default() -> Self {
        Self {
            allowed_actors: BTreeSet::new(),
            allowed_tools: BTreeSet::new(),
            allowed_states: operational_states(),
            required_fields: default_required_fields(),
            max_param_bytes: DEFAULT_MAX_PARAM_BYTES,
            max_intent_length: DEFAULT_MAX_INTENT_LENGTH,
            allow_intent_only: false,
        }
    }
}

impl JurisdictionPolicy {
    /// Policy with wildcard actor and tool access.
    pub fn open() -> Self {
        Self {
            allowed_actors: BTreeSet::from([WILDCARD.to_string()]),
            allowed_tools: BTreeSet::from([WILDCARD.to_string()]),
            ..Self::default()
        }
    }

    /// Policy with empty allowlists (denies all by default).
    pub fn locked() -> Self {
        Self::default()
    }

    /// Build a policy from a JSON object.
    ///
    /// Missing keys fall back to the defaults; `allowed_states` entries are
    /// the upper-case state names.
    pub fn from_value(value: &Value) -> Result<Self, KernelError> {
        let obj = value
            .as_object()
            .ok_or_else(|| KernelError::Config("policy must be an object".into()))?;

        let string_set = |key: &str| -> Result<Option<BTreeSet<String>>, KernelError> {
            match obj.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::Array(items)) => {
                    let mut set = BTreeSet::new();
                    for item in items {
                        let s = item.as_str().ok_or_else(|| {
                            KernelError::Config(format!("{} entries must be strings", key))
                        })?;
                        set.insert(s.to_string());
                    }
                    Ok(Some(set))
                }
                Some(_) => Err(KernelError::Config(format!("{} must be an array", key))),
            }
        };

        let allowed_states = match string_set("allowed_states")? {
            None => operational_states(),
            Some(names) if names.is_empty() => operational_states(),
            Some(names) => {
                let mut states = BTreeSet::new();
                for name in names {
                    states.insert(KernelState::from_str(&name)?);
                }
                states
            }
        };

        let usize_field = |key: &str, default: usize| -> Result<usize, KernelError> {
            match obj.get(key) {
                None | Some(Value::Null) => Ok(default),
                Some(v) => v
                    .as_u64()
                    .map(|n| n as usize)
                    .ok_or_else(|| {
                        KernelError::Config(format!("{} must be a non-negative integer", key))
                    }),
            }
        };

        Ok(Self {
            allowed_actors: string_set("allowed_actors")?.unwrap_or_default(),
            allowed_tools: string_set("allowed_tools")?.unwrap_or_default(),
            allowed_states,
            required_fields: string_set("required_fields")?
                .unwrap_or_else(default_required_fields),
            max_param_bytes: usize_field("max_param_bytes", DEFAULT_MAX_PARAM_BYTES)?,
            max_intent_length: usize_field("max_intent_length", DEFAULT_MAX_INTENT_LENGTH)?,
            allow_intent_only: obj
                .get("allow_intent_only")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }

    /// Wildcard-aware actor membership.
    pub fn allows_actor(&self, actor: &str) -> bool {
        self.allowed_actors.contains(WILDCARD) || self.allowed_actors.contains(actor)
    }

    /// Wildcard-aware tool membership.
    pub fn allows_tool(&self, tool: &str) -> bool {
        self.allowed_tools.contains(WILDCARD) || self.allowed_tools.contains(tool)
    }

    /// True when operations are allowed in `state`.
    pub fn allows_state(&self, state: KernelState) -> bool {
        self.allowed_states.contains(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_policy_allows_everything() {
        let policy = JurisdictionPolicy::open();
        assert!(policy.allows_actor("any_actor"));
        assert!(policy.allows_tool("any_tool"));
    }

    #[test]
    fn test_locked_policy_denies_everything() {
        let policy = JurisdictionPolicy::locked();
        assert!(!policy.allows_actor("any_actor"));
        assert!(!policy.allows_tool("any_tool"));
    }

    #[test]
    fn test_specific_actors() {
        let policy = JurisdictionPolicy {
            allowed_actors: BTreeSet::from(["alice".to_string(), "bob".to_string()]),
            allowed_tools: BTreeSet::from([WILDCARD.to_string()]),
            ..JurisdictionPolicy::default()
        };
        assert!(policy.allows_actor("alice"));
        assert!(policy.allows_actor("bob"));
        assert!(!policy.allows_actor("charlie"));
    }

    #[test]
    fn test_specific_tools() {
        let policy = JurisdictionPolicy {
            allowed_actors: BTreeSet::from([WILDCARD.to_string()]),
            allowed_tools: BTreeSet::from(["echo".to_string(), "add".to_string()]),
            ..JurisdictionPolicy::default()
        };
        assert!(policy.allows_tool("echo"));
        assert!(policy.allows_tool("add"));
        assert!(!policy.allows_tool("delete"));
    }

    #[test]
    fn test_allows_state_defaults() {
        let policy = JurisdictionPolicy::default();
        assert!(policy.allows_state(KernelState::Idle));
        assert!(policy.allows_state(KernelState::Executing));
        assert!(!policy.allows_state(KernelState::Halted));
        assert!(!policy.allows_state(KernelState::Booting));
    }

    #[test]
    fn test_from_value() {
        let policy = JurisdictionPolicy::from_value(&json!({
            "allowed_actors": ["user1"],
            "allowed_tools": ["tool1"],
            "max_param_bytes": 1024,
        }))
        .expect("policy parse failed");
        assert!(policy.allows_actor("user1"));
        assert!(!policy.allows_actor("user2"));
        assert_eq!(policy.max_param_bytes, 1024);
        assert_eq!(policy.max_intent_length, DEFAULT_MAX_INTENT_LENGTH);
        assert!(!policy.allow_intent_only);
    }

    #[test]
    fn test_from_value_with_states() {
        let policy = JurisdictionPolicy::from_value(&json!({
            "allowed_states": ["IDLE", "EXECUTING"],
        }))
        .expect("policy parse failed");
        assert!(policy.allows_state(KernelState::Idle));
        assert!(!policy.allows_state(KernelState::Auditing));
    }

    #[test]
    fn test_from_value_rejects_bad_shapes() {
        assert!(JurisdictionPolicy::from_value(&json!([])).is_err());
        assert!(
            JurisdictionPolicy::from_value(&json!({"allowed_actors": "alice"})).is_err()
        );
        assert!(
            JurisdictionPolicy::from_value(&json!({"allowed_states": ["SPINNING"]})).is_err()
        );
        assert!(
            JurisdictionPolicy::from_value(&json!({"max_param_bytes": -1})).is_err()
        );
    }
}
