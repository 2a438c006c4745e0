/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! The state transition table.
//!
//! The table is exhaustive: a pair absent from it is illegal, full stop.
//! HALTED has no successors and is therefore terminal. Every path a request
//! can take reaches AUDITING before returning to IDLE, so no request leaves
//! the kernel without an audit entry.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

use crate::error::KernelError;
use crate::types::KernelState;

lazy_static! {
    /// Allowed transitions: from-state to the set of legal to-states.
    pub static ref ALLOWED_TRANSITIONS: HashMap<KernelState, HashSet<KernelState>> = {
        use KernelState::*;
        let mut table = HashMap::new();
        table.insert(Booting, HashSet::from([Idle, Halted]));
        table.insert(Idle, HashSet::from([Validating, Halted]));
        // Validation failures skip arbitration and go straight to audit.
        table.insert(Validating, HashSet::from([Arbitrating, Auditing, Halted]));
        // Denied requests skip execution and go straight to audit.
        table.insert(Arbitrating, HashSet::from([Executing, Auditing, Halted]));
        table.insert(Executing, HashSet::from([Auditing, Halted]));
        table.insert(Auditing, HashSet::from([Idle, Halted]));
        table.insert(Halted, HashSet::new());
        table
    };
}

/// True when `from -> to` appears in the table.
pub fn can_transition(from: KernelState, to: KernelState) -> bool {
    ALLOWED_TRANSITIONS
        .get(&from)
        .map(|allowed| allowed.contains(&to))
        .unwrap_or(false)
}

/// All states reachable from `state` in one transition.
pub fn next_states(state: KernelState) -> HashSet<KernelState> {
    ALLOWED_TRANSITIONS
        .get(&state)
        .cloned()
        .unwrap_or_default()
}

/// True when `state` has no outgoing transitions.
pub fn is_terminal(state: KernelState) -> bool {
    ALLOWED_TRANSITIONS
        .get(&state)
        .map(|allowed| allowed.is_empty())
        .unwrap_or(true)
}

/// Validate a sequence of states as a legal transition path.
pub fn validate_transition_path(path: &[KernelState]) -> Result<(), KernelError> {
    for window in path.windows(2) {
        if !can_transition(window[0], window[1]) {
            return Err(KernelError::State(format!(
                "Invalid transition: {} -> {}",
                window[0], window[1]
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KernelState::*;

    #[test]
    fn test_legal_transitions() {
        assert!(can_transition(Booting, Idle));
        assert!(can_transition(Idle, Validating));
        assert!(can_transition(Validating, Arbitrating));
        assert!(can_transition(Validating, Auditing));
        assert!(can_transition(Arbitrating, Executing));
        assert!(can_transition(Arbitrating, Auditing));
        assert!(can_transition(Executing, Auditing));
        assert!(can_transition(Auditing, Idle));
    }

    #[test]
    fn test_halt_reachable_from_every_non_terminal() {
        for state in [Booting, Idle, Validating, Arbitrating, Executing, Auditing] {
            assert!(can_transition(state, Halted), "{} -> HALTED missing", state);
        }
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!can_transition(Idle, Executing));
        assert!(!can_transition(Validating, Executing));
        assert!(!can_transition(Executing, Idle));
        assert!(!can_transition(Auditing, Validating));
        assert!(!can_transition(Booting, Validating));
    }

    #[test]
    fn test_halted_is_terminal() {
        assert!(is_terminal(Halted));
        assert!(next_states(Halted).is_empty());
        assert!(!can_transition(Halted, Idle));
        assert!(!can_transition(Halted, Booting));
    }

    #[test]
    fn test_non_terminal_states() {
        for state in [Booting, Idle, Validating, Arbitrating, Executing, Auditing] {
            assert!(!is_terminal(state));
        }
    }

    #[test]
    fn test_validate_transition_path_full_request() {
        let path = [Idle, Validating, Arbitrating, Executing, Auditing, Idle];
        assert!(validate_transition_path(&path).is_ok());
    }

    #[test]
    fn test_validate_transition_path_denied_request() {
        let path = [Idle, Validating, Arbitrating, Auditing, Idle];
        assert!(validate_transition_path(&path).is_ok());
    }

    #[test]
    fn test_validate_transition_path_rejects_shortcut() {
        let path = [Idle, Executing];
        let err = validate_transition_path(&path).expect_err("path should be illegal");
        assert!(err.to_string().contains("IDLE -> EXECUTING"));
    }

    #[test]
    fn test_validate_transition_path_trivial() {
        assert!(validate_transition_path(&[]).is_ok());
        assert!(validate_transition_path(&[Idle]).is_ok());
    }
}
