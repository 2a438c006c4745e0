/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Error taxonomy for the Ark Arbiter kernel.
//!
//! Every error that can surface from the kernel belongs to one of the kinds
//! below. Nothing that originates inside the request pipeline escapes
//! `Kernel::submit`: the pipeline converts failures into receipts and the
//! kernel fails closed (DENY) on anything it cannot classify.

use thiserror::Error;

/// Top-level kernel error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// Boot-sequence failure (double boot, boot from a non-BOOTING state).
    /// Never produces a ledger entry.
    #[error("boot error: {0}")]
    Boot(String),

    /// Misconfiguration (unsupported hash algorithm, bad policy document).
    #[error("configuration error: {0}")]
    Config(String),

    /// Illegal state machine transition.
    #[error("state error: {0}")]
    State(String),

    /// Policy violation raised during arbitration.
    #[error("jurisdiction error: {0}")]
    Jurisdiction(String),

    /// Request failed the ambiguity heuristics.
    #[error("ambiguity error: {0}")]
    Ambiguity(String),

    /// Tool dispatch failure surfaced through the kernel.
    #[error("tool error: {0}")]
    Tool(String),

    /// Audit ledger failure. Fatal: the kernel halts.
    #[error("audit error: {0}")]
    Audit(String),

    /// Virtual clock misuse (moving time backwards).
    #[error("clock error: {0}")]
    Clock(String),
}

/// Structured errors from the tool registry and dispatcher.
///
/// The stable `code()` strings are what callers switch on; the `Display`
/// output is the human-readable message carried on receipts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The named tool is not registered with the dispatcher.
    #[error("unknown tool '{0}'")]
    Unknown(String),

    /// The tool call parameters are not an object mapping.
    #[error("invalid params for tool '{0}': params must be an object")]
    BadParams(String),

    /// The handler ran and failed, or rejected its parameters.
    #[error("tool '{name}' execution failed: {message}")]
    Failed { name: String, message: String },

    /// Registration collision.
    #[error("tool '{0}' is already registered")]
    AlreadyRegistered(String),

    /// Unregistration of an absent tool.
    #[error("tool '{0}' is not registered")]
    NotRegistered(String),

    /// Registration with an empty name.
    #[error("tool name cannot be empty")]
    EmptyName,
}

impl ToolError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::Unknown(_) => "TOOL_UNKNOWN",
            ToolError::BadParams(_) => "TOOL_BAD_PARAMS",
            ToolError::Failed { .. } => "TOOL_FAILED",
            ToolError::AlreadyRegistered(_) => "TOOL_ALREADY_REGISTERED",
            ToolError::NotRegistered(_) => "TOOL_NOT_REGISTERED",
            ToolError::EmptyName => "TOOL_EMPTY_NAME",
        }
    }
}

impl From<ToolError> for KernelError {
    fn from(err: ToolError) -> Self {
        KernelError::Tool(format!("{}: {}", err.code(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_codes() {
        assert_eq!(ToolError::Unknown("x".into()).code(), "TOOL_UNKNOWN");
        assert_eq!(ToolError::BadParams("x".into()).code(), "TOOL_BAD_PARAMS");
        assert_eq!(
            ToolError::Failed {
                name: "x".into(),
                message: "boom".into()
            }
            .code(),
            "TOOL_FAILED"
        );
    }

    #[test]
    fn test_kernel_error_display() {
        let err = KernelError::State("Invalid transition: IDLE -> EXECUTING".into());
        assert_eq!(
            err.to_string(),
            "state error: Invalid transition: IDLE -> EXECUTING"
        );
    }

    #[test]
    fn test_tool_error_into_kernel_error() {
        let err: KernelError = ToolError::Unknown("missing".into()).into();
        match err {
            KernelError::Tool(msg) => {
                assert!(msg.starts_with("TOOL_UNKNOWN"));
                assert!(msg.contains("missing"));
            }
            other => panic!("unexpected error kind: {:?}", other),
        }
    }
}
