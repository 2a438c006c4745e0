/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 *
 * 1. OPEN SOURCE: You may use this file under the terms of the GNU Affero
 * General Public License v3.0. If you link to this code, your ENTIRE
 * application must be open-sourced under AGPLv3.
 *
 * 2. COMMERCIAL: For proprietary use, you must obtain a Commercial License
 * from Sovereign Systems.
 *
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 * NO IMPLIED LICENSE to rights of Mohamad Al-Zawahreh or Sovereign Systems.
 */

//! The kernel pipeline.
//!
//! One kernel owns its state machine, policy, tool registry and ledger for
//! its entire life. `submit` drives a request through
//! validate -> arbitrate -> execute -> audit and always returns a receipt;
//! exactly one ledger entry is appended per submitted request. The kernel is
//! fail-closed: any condition it cannot classify becomes a DENY, and a
//! programmer error halts it rather than letting an unaudited action
//! through.
//!
//! `&mut self` on `submit`/`halt` is the mutual-exclusion guard: only one
//! request is ever in flight, and the state machine and ledger are never
//! observable mid-transition. The async facade in `async_kernel` wraps this
//! same pipeline behind a tokio mutex.

use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::clock::VirtualClock;
use crate::dispatcher::Dispatcher;
use crate::error::KernelError;
use crate::hashing::{check_hash_alg, compute_hash_value};
use crate::ledger::{AuditLedger, AuditRecord};
use crate::machine::StateMachine;
use crate::policy::JurisdictionPolicy;
use crate::rules;
use crate::tools::{create_default_registry, ToolRegistry};
use crate::types::{
    Decision, EvidenceBundle, KernelConfig, KernelReceipt, KernelRequest, KernelState,
    ReceiptStatus,
};
use crate::validate;
use crate::variants::{Variant, PERMISSIVE_MAX_INTENT_LENGTH};

/// A deterministic governance kernel.
#[derive(Debug)]
pub struct Kernel {
    machine: StateMachine,
    ledger: AuditLedger,
    dispatcher: Dispatcher,
    policy: JurisdictionPolicy,
    clock: VirtualClock,
    config: Option<KernelConfig>,
}

impl Kernel {
    /// New unbooted kernel with the built-in tool registry.
    pub fn new() -> Self {
        Self::with_registry(create_default_registry())
    }

    /// New unbooted kernel with a caller-provided registry.
    pub fn with_registry(registry: ToolRegistry) -> Self {
        Self {
            machine: StateMachine::new(),
            ledger: AuditLedger::new("", ""),
            dispatcher: Dispatcher::new(registry),
            policy: JurisdictionPolicy::locked(),
            clock: VirtualClock::default(),
            config: None,
        }
    }

    /// Install the variant policy and move BOOTING -> IDLE.
    ///
    /// `fail_closed` is forced true. Strict, evidence-first and dual-channel
    /// force jurisdiction and audit on; permissive raises the intent cap.
    pub fn boot(&mut self, config: KernelConfig) -> Result<(), KernelError> {
        if self.config.is_some() {
            return Err(KernelError::Boot("kernel already booted".into()));
        }
        if self.machine.state() != KernelState::Booting {
            return Err(KernelError::Boot(format!(
                "boot requires BOOTING state, kernel is {}",
                self.machine.state()
            )));
        }
        check_hash_alg(&config.hash_alg)?;

        let mut config = config;
        config.fail_closed = true;
        match config.variant {
            Variant::Strict | Variant::EvidenceFirst | Variant::DualChannel => {
                config.require_jurisdiction = true;
                config.require_audit = true;
            }
            Variant::Permissive => {
                config.max_intent_length = PERMISSIVE_MAX_INTENT_LENGTH;
            }
        }

        self.policy = config.variant.policy(&config);
        self.ledger = AuditLedger::new(&config.kernel_id, config.variant.as_str());
        self.clock = config.clock.clone();
        self.machine.transition(KernelState::Idle)?;
        self.config = Some(config);
        Ok(())
    }

    /// Current observable state.
    pub fn state(&self) -> KernelState {
        self.machine.state()
    }

    /// The variant installed at boot, if booted.
    pub fn variant(&self) -> Option<Variant> {
        self.config.as_ref().map(|c| c.variant)
    }

    /// The installed jurisdiction policy.
    pub fn policy(&self) -> &JurisdictionPolicy {
        &self.policy
    }

    /// The audit ledger (read-only).
    pub fn ledger(&self) -> &AuditLedger {
        &self.ledger
    }

    /// Registry access for setup. The registry must not be mutated while
    /// requests are being submitted.
    pub fn registry_mut(&mut self) -> &mut ToolRegistry {
        self.dispatcher.registry_mut()
    }

    /// The virtual clock; the host advances it between submits.
    pub fn clock_mut(&mut self) -> &mut VirtualClock {
        &mut self.clock
    }

    /// Submit a request. Always returns a receipt; appends exactly one
    /// ledger entry unless the kernel is unbooted or halted.
    pub fn submit(&mut self, request: &KernelRequest) -> KernelReceipt {
        let state_from = self.machine.state();

        let audit_halted_denials = match &self.config {
            Some(config) => config.audit_halted_denials,
            None => {
                return self.receipt(
                    request,
                    ReceiptStatus::Rejected,
                    Decision::Deny,
                    state_from,
                    state_from,
                    Some("kernel not booted".into()),
                    None,
                )
            }
        };

        if self.machine.is_halted() {
            if audit_halted_denials {
                let mut record = AuditRecord::new(
                    request.request_id.as_str(),
                    request.actor.as_str(),
                    request.intent.as_str(),
                    Decision::Deny,
                    KernelState::Halted,
                    KernelState::Halted,
                    self.clock.now_ms(),
                );
                record.error = Some("kernel halted".into());
                self.ledger.append(record);
            }
            return self.receipt(
                request,
                ReceiptStatus::Rejected,
                Decision::Halt,
                state_from,
                state_from,
                Some("kernel halted".into()),
                None,
            );
        }

        let entries_before = self.ledger.len();
        let outcome = catch_unwind(AssertUnwindSafe(|| self.process(request, state_from)));
        match outcome {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(_)) | Err(_) => self.fail_closed(request, state_from, entries_before),
        }
    }

    /// Halt the kernel. Appends one HALT entry; later submits are rejected.
    pub fn halt(&mut self, reason: &str) -> Result<KernelReceipt, KernelError> {
        if self.config.is_none() {
            return Err(KernelError::Boot("kernel not booted".into()));
        }
        let state_from = self.machine.state();
        self.machine.halt()?;
        let ts_ms = self.clock.now_ms();
        self.ledger.append(AuditRecord::new(
            "halt",
            "system",
            reason,
            Decision::Halt,
            state_from,
            KernelState::Halted,
            ts_ms,
        ));
        Ok(KernelReceipt {
            request_id: "halt".into(),
            status: ReceiptStatus::Accepted,
            state_from,
            state_to: KernelState::Halted,
            ts_ms,
            decision: Decision::Halt,
            error: None,
            evidence_hash: None,
            tool_result: None,
        })
    }

    /// Snapshot the ledger into an evidence bundle stamped with the current
    /// clock.
    pub fn export_evidence(&self) -> EvidenceBundle {
        self.ledger.export(self.clock.now_ms())
    }

    // -- pipeline internals --------------------------------------------------

    fn process(
        &mut self,
        request: &KernelRequest,
        state_from: KernelState,
    ) -> Result<KernelReceipt, KernelError> {
        let variant = self
            .config
            .as_ref()
            .map(|c| c.variant)
            .ok_or_else(|| KernelError::Boot("kernel not booted".into()))?;

        // VALIDATING: structure, types, sizes.
        self.machine.transition(KernelState::Validating)?;
        let mut errors = validate::validate_request(request);
        errors.extend(rules::check_param_size(request, &self.policy));
        errors.extend(rules::check_intent_length(request, &self.policy));
        if !errors.is_empty() {
            return self.audit_denial(request, state_from, errors);
        }

        // ARBITRATING: policy, variant hook, ambiguity, dispatchability.
        self.machine.transition(KernelState::Arbitrating)?;
        let mut violations = rules::evaluate_policy(request, &self.policy).violations;
        violations.extend(variant.check(request));
        violations.extend(validate::check_ambiguity(
            request,
            self.policy.max_intent_length,
            variant.strict_ambiguity(),
        ));
        if let Some(tool_call) = &request.tool_call {
            violations.extend(self.dispatcher.validate_tool_call(tool_call));
        }
        if !violations.is_empty() {
            return self.audit_denial(request, state_from, violations);
        }

        // Intent-only requests: allowed without execution, or denied.
        let Some(tool_call) = request.tool_call.clone() else {
            if self.policy.allow_intent_only {
                return self.audit_allow_intent_only(request, state_from);
            }
            return self.audit_denial(
                request,
                state_from,
                vec!["tool_call is required".to_string()],
            );
        };

        // EXECUTING: dispatch the tool.
        self.machine.transition(KernelState::Executing)?;
        let exec = self.dispatcher.execute(&tool_call);

        // AUDITING: one entry, decision ALLOW, execution error if any.
        self.machine.transition(KernelState::Auditing)?;
        let ts_ms = self.clock.now_ms();
        let evidence_hash = Self::evidence_hash(request);
        let mut record = AuditRecord::new(
            request.request_id.as_str(),
            request.actor.as_str(),
            request.intent.as_str(),
            Decision::Allow,
            state_from,
            KernelState::Idle,
            ts_ms,
        );
        record.tool_name = Some(tool_call.name.clone());
        record.params_hash = Some(compute_hash_value(&Value::Object(tool_call.params.clone())));
        record.evidence_hash = evidence_hash.clone();
        record.error = exec.error.clone();
        self.ledger.append(record);
        self.machine.transition(KernelState::Idle)?;

        let status = if exec.success {
            ReceiptStatus::Accepted
        } else {
            ReceiptStatus::Failed
        };
        Ok(KernelReceipt {
            request_id: request.request_id.clone(),
            status,
            state_from,
            state_to: KernelState::Idle,
            ts_ms,
            decision: Decision::Allow,
            error: exec.error,
            evidence_hash,
            tool_result: exec.result,
        })
    }

    fn audit_denial(
        &mut self,
        request: &KernelRequest,
        state_from: KernelState,
        violations: Vec<String>,
    ) -> Result<KernelReceipt, KernelError> {
        self.machine.transition(KernelState::Auditing)?;
        let ts_ms = self.clock.now_ms();
        let error = violations.join("; ");
        let evidence_hash = Self::evidence_hash(request);

        let mut record = AuditRecord::new(
            request.request_id.as_str(),
            request.actor.as_str(),
            request.intent.as_str(),
            Decision::Deny,
            state_from,
            KernelState::Idle,
            ts_ms,
        );
        record.tool_name = request.tool_call.as_ref().map(|tc| tc.name.clone());
        record.params_hash = request
            .tool_call
            .as_ref()
            .map(|tc| compute_hash_value(&Value::Object(tc.params.clone())));
        record.evidence_hash = evidence_hash.clone();
        record.error = Some(error.clone());
        self.ledger.append(record);
        self.machine.transition(KernelState::Idle)?;

        Ok(KernelReceipt {
            request_id: request.request_id.clone(),
            status: ReceiptStatus::Rejected,
            state_from,
            state_to: KernelState::Idle,
            ts_ms,
            decision: Decision::Deny,
            error: Some(error),
            evidence_hash,
            tool_result: None,
        })
    }

    fn audit_allow_intent_only(
        &mut self,
        request: &KernelRequest,
        state_from: KernelState,
    ) -> Result<KernelReceipt, KernelError> {
        self.machine.transition(KernelState::Auditing)?;
        let ts_ms = self.clock.now_ms();
        let evidence_hash = Self::evidence_hash(request);

        let mut record = AuditRecord::new(
            request.request_id.as_str(),
            request.actor.as_str(),
            request.intent.as_str(),
            Decision::Allow,
            state_from,
            KernelState::Idle,
            ts_ms,
        );
        record.evidence_hash = evidence_hash.clone();
        self.ledger.append(record);
        self.machine.transition(KernelState::Idle)?;

        Ok(KernelReceipt {
            request_id: request.request_id.clone(),
            status: ReceiptStatus::Accepted,
            state_from,
            state_to: KernelState::Idle,
            ts_ms,
            decision: Decision::Allow,
            error: None,
            evidence_hash,
            tool_result: None,
        })
    }

    /// Boundary handler for programmer errors: halt, audit once, fail the
    /// receipt. Never appends a second entry for a request that already
    /// audited.
    fn fail_closed(
        &mut self,
        request: &KernelRequest,
        state_from: KernelState,
        entries_before: usize,
    ) -> KernelReceipt {
        if !self.machine.is_terminal() {
            // HALTED is reachable from every non-terminal state, so this
            // cannot fail; ignore the result to stay panic-free here.
            let _ = self.machine.halt();
        }
        let ts_ms = self.clock.now_ms();
        if self.ledger.len() == entries_before {
            let mut record = AuditRecord::new(
                request.request_id.as_str(),
                request.actor.as_str(),
                request.intent.as_str(),
                Decision::Deny,
                state_from,
                KernelState::Halted,
                ts_ms,
            );
            record.error = Some("internal".into());
            self.ledger.append(record);
        }
        KernelReceipt {
            request_id: request.request_id.clone(),
            status: ReceiptStatus::Failed,
            state_from,
            state_to: KernelState::Halted,
            ts_ms,
            decision: Decision::Deny,
            error: Some("internal".into()),
            evidence_hash: None,
            tool_result: None,
        }
    }

    fn evidence_hash(request: &KernelRequest) -> Option<String> {
        request
            .evidence
            .as_ref()
            .map(|evidence| compute_hash_value(&Value::String(evidence.clone())))
    }

    #[allow(clippy::too_many_arguments)]
    fn receipt(
        &self,
        request: &KernelRequest,
        status: ReceiptStatus,
        decision: Decision,
        state_from: KernelState,
        state_to: KernelState,
        error: Option<String>,
        tool_result: Option<Value>,
    ) -> KernelReceipt {
        KernelReceipt {
            request_id: request.request_id.clone(),
            status,
            state_from,
            state_to,
            ts_ms: self.clock.now_ms(),
            decision,
            error,
            evidence_hash: None,
            tool_result,
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolCall;
    use serde_json::{json, Map};

    fn booted(variant: Variant) -> Kernel {
        let mut kernel = Kernel::new();
        kernel
            .boot(KernelConfig::new("k1", variant).with_clock(VirtualClock::new(1000)))
            .expect("boot failed");
        kernel
    }

    fn echo_request(request_id: &str) -> KernelRequest {
        let mut request = KernelRequest::new(request_id, 1000, "a", "echo it");
        let mut params = Map::new();
        params.insert("text".into(), json!("hi"));
        request.tool_call = Some(ToolCall::new("echo", params));
        request
    }

    #[test]
    fn test_boot_reaches_idle() {
        let kernel = booted(Variant::Strict);
        assert_eq!(kernel.state(), KernelState::Idle);
        assert_eq!(kernel.variant(), Some(Variant::Strict));
        assert_eq!(kernel.ledger().kernel_id(), "k1");
        assert_eq!(kernel.ledger().variant(), "strict");
    }

    #[test]
    fn test_double_boot_fails() {
        let mut kernel = booted(Variant::Strict);
        let err = kernel
            .boot(KernelConfig::new("k2", Variant::Strict))
            .expect_err("second boot should fail");
        assert!(matches!(err, KernelError::Boot(_)));
    }

    #[test]
    fn test_boot_rejects_unknown_hash_alg() {
        let mut kernel = Kernel::new();
        let mut config = KernelConfig::new("k1", Variant::Strict);
        config.hash_alg = "blake3".into();
        let err = kernel.boot(config).expect_err("boot should fail");
        assert!(matches!(err, KernelError::Config(_)));
        assert_eq!(kernel.state(), KernelState::Booting);
    }

    #[test]
    fn test_submit_before_boot() {
        let mut kernel = Kernel::new();
        let receipt = kernel.submit(&echo_request("r1"));
        assert_eq!(receipt.status, ReceiptStatus::Rejected);
        assert_eq!(receipt.decision, Decision::Deny);
        assert_eq!(receipt.error.as_deref(), Some("kernel not booted"));
        assert_eq!(kernel.ledger().len(), 0);
    }

    #[test]
    fn test_allowed_tool_request() {
        let mut kernel = booted(Variant::Strict);
        let receipt = kernel.submit(&echo_request("r1"));

        assert_eq!(receipt.status, ReceiptStatus::Accepted);
        assert_eq!(receipt.decision, Decision::Allow);
        assert_eq!(receipt.tool_result, Some(json!("hi")));
        assert_eq!(receipt.state_from, KernelState::Idle);
        assert_eq!(receipt.state_to, KernelState::Idle);
        assert!(receipt.error.is_none());

        assert_eq!(kernel.ledger().len(), 1);
        let entry = &kernel.ledger().entries()[0];
        assert_eq!(entry.decision, Decision::Allow);
        assert_eq!(entry.tool_name.as_deref(), Some("echo"));
        assert!(entry.params_hash.is_some());
        assert_eq!(kernel.state(), KernelState::Idle);
    }

    #[test]
    fn test_intent_only_denied_in_strict() {
        let mut kernel = booted(Variant::Strict);
        let receipt = kernel.submit(&KernelRequest::new("r1", 1000, "a", "just talk"));
        assert_eq!(receipt.status, ReceiptStatus::Rejected);
        assert_eq!(receipt.decision, Decision::Deny);
        assert!(receipt
            .error
            .as_deref()
            .expect("error missing")
            .contains("tool_call is required"));
        assert_eq!(kernel.ledger().len(), 1);
    }

    #[test]
    fn test_intent_only_allowed_in_permissive() {
        let mut kernel = booted(Variant::Permissive);
        let receipt = kernel.submit(&KernelRequest::new("r1", 1000, "a", "just talk"));
        assert_eq!(receipt.status, ReceiptStatus::Accepted);
        assert_eq!(receipt.decision, Decision::Allow);
        assert!(receipt.tool_result.is_none());
        assert_eq!(kernel.ledger().len(), 1);
    }

    #[test]
    fn test_structural_failure_audits_denial() {
        let mut kernel = booted(Variant::Strict);
        let receipt = kernel.submit(&KernelRequest::new("", -5, "a", "x"));
        assert_eq!(receipt.status, ReceiptStatus::Rejected);
        assert_eq!(receipt.decision, Decision::Deny);
        let error = receipt.error.expect("error missing");
        assert!(error.contains("request_id is required"));
        assert!(error.contains("ts_ms must be non-negative"));
        assert_eq!(kernel.ledger().len(), 1);
        assert_eq!(kernel.ledger().entries()[0].decision, Decision::Deny);
    }

    #[test]
    fn test_handler_failure_yields_failed_receipt() {
        let mut kernel = booted(Variant::Strict);
        let mut request = KernelRequest::new("r1", 1000, "a", "echo without text");
        request.tool_call = Some(ToolCall::new("echo", Map::new()));

        let receipt = kernel.submit(&request);
        assert_eq!(receipt.status, ReceiptStatus::Failed);
        assert_eq!(receipt.decision, Decision::Allow);
        assert!(receipt
            .error
            .as_deref()
            .expect("error missing")
            .starts_with("TOOL_FAILED"));

        // The kernel keeps running; the entry records ALLOW plus the error.
        assert_eq!(kernel.state(), KernelState::Idle);
        let entry = &kernel.ledger().entries()[0];
        assert_eq!(entry.decision, Decision::Allow);
        assert!(entry.error.is_some());
    }

    #[test]
    fn test_panicking_handler_is_contained() {
        let mut kernel = booted(Variant::Strict);
        kernel
            .registry_mut()
            .register(
                "boom",
                Box::new(|_| panic!("handler exploded")),
                "Always panics",
                Default::default(),
            )
            .expect("register failed");

        let mut request = KernelRequest::new("r1", 1000, "a", "go boom");
        let mut params = Map::new();
        params.insert("x".into(), json!(1));
        request.tool_call = Some(ToolCall::new("boom", params));

        let receipt = kernel.submit(&request);
        assert_eq!(receipt.status, ReceiptStatus::Failed);
        assert_eq!(receipt.decision, Decision::Allow);
        assert!(receipt
            .error
            .as_deref()
            .expect("error missing")
            .starts_with("TOOL_FAILED"));
        assert_eq!(kernel.state(), KernelState::Idle);
        assert_eq!(kernel.ledger().len(), 1);
    }

    #[test]
    fn test_halt_and_post_halt_submit() {
        let mut kernel = booted(Variant::Strict);
        let receipt = kernel.halt("maintenance").expect("halt failed");
        assert_eq!(receipt.decision, Decision::Halt);
        assert_eq!(receipt.state_to, KernelState::Halted);
        assert_eq!(kernel.state(), KernelState::Halted);
        assert_eq!(kernel.ledger().len(), 1);
        let entry = &kernel.ledger().entries()[0];
        assert_eq!(entry.decision, Decision::Halt);
        assert_eq!(entry.intent, "maintenance");

        // Post-halt submits short-circuit without touching the ledger.
        let denied = kernel.submit(&echo_request("r2"));
        assert_eq!(denied.status, ReceiptStatus::Rejected);
        assert_eq!(denied.decision, Decision::Halt);
        assert_eq!(denied.error.as_deref(), Some("kernel halted"));
        assert_eq!(kernel.ledger().len(), 1);
    }

    #[test]
    fn test_double_halt_fails() {
        let mut kernel = booted(Variant::Strict);
        kernel.halt("first").expect("halt failed");
        assert!(kernel.halt("second").is_err());
        assert_eq!(kernel.ledger().len(), 1);
    }

    #[test]
    fn test_audit_halted_denials_option() {
        let mut kernel = Kernel::new();
        let mut config =
            KernelConfig::new("k1", Variant::Strict).with_clock(VirtualClock::new(1000));
        config.audit_halted_denials = true;
        kernel.boot(config).expect("boot failed");
        kernel.halt("stop").expect("halt failed");

        let receipt = kernel.submit(&echo_request("r1"));
        assert_eq!(receipt.decision, Decision::Halt);
        assert_eq!(kernel.ledger().len(), 2);
        let entry = &kernel.ledger().entries()[1];
        assert_eq!(entry.decision, Decision::Deny);
        assert_eq!(entry.error.as_deref(), Some("kernel halted"));
    }

    #[test]
    fn test_one_entry_per_request() {
        let mut kernel = booted(Variant::Strict);
        kernel.submit(&echo_request("r1"));
        kernel.submit(&KernelRequest::new("r2", 1000, "a", ""));
        kernel.submit(&echo_request("r3"));
        assert_eq!(kernel.ledger().len(), 3);
        kernel.halt("done").expect("halt failed");
        assert_eq!(kernel.ledger().len(), 4);
    }

    #[test]
    fn test_duplicate_request_ids_are_distinct_events() {
        let mut kernel = booted(Variant::Strict);
        kernel.submit(&echo_request("r1"));
        kernel.submit(&echo_request("r1"));
        assert_eq!(kernel.ledger().len(), 2);
    }

    #[test]
    fn test_evidence_hash_on_receipt_and_entry() {
        let mut kernel = booted(Variant::EvidenceFirst);
        let mut request = echo_request("r1");
        request.evidence = Some("ticket ARB-42 approved".into());

        let receipt = kernel.submit(&request);
        assert_eq!(receipt.status, ReceiptStatus::Accepted);
        let receipt_hash = receipt.evidence_hash.expect("evidence hash missing");
        let entry_hash = kernel.ledger().entries()[0]
            .evidence_hash
            .clone()
            .expect("evidence hash missing");
        assert_eq!(receipt_hash, entry_hash);
        assert_eq!(receipt_hash.len(), 64);
    }

    #[test]
    fn test_export_evidence() {
        let mut kernel = booted(Variant::Strict);
        kernel.submit(&echo_request("r1"));
        kernel.clock_mut().advance(500).expect("advance failed");

        let bundle = kernel.export_evidence();
        assert_eq!(bundle.kernel_id, "k1");
        assert_eq!(bundle.variant, "strict");
        assert_eq!(bundle.exported_at_ms, 1500);
        assert_eq!(bundle.ledger_entries.len(), 1);
        assert_eq!(bundle.root_hash, kernel.ledger().root_hash());
    }

    #[test]
    fn test_clock_stamps_entries() {
        let mut kernel = booted(Variant::Strict);
        kernel.submit(&echo_request("r1"));
        kernel.clock_mut().advance(250).expect("advance failed");
        kernel.submit(&echo_request("r2"));

        let entries = kernel.ledger().entries();
        assert_eq!(entries[0].ts_ms, 1000);
        assert_eq!(entries[1].ts_ms, 1250);
    }
}
