/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Tool execution dispatcher.
//!
//! The dispatcher validates a tool call's shape, invokes the handler through
//! the registry, and converts every failure into a structured error. No
//! failure escapes `execute`; the caller always gets an `ExecutionResult`.

use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::ToolError;
use crate::tools::ToolRegistry;
use crate::types::ToolCall;

/// Result of a tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub success: bool,
    pub tool_name: String,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl ExecutionResult {
    fn ok(tool_name: &str, result: Value) -> Self {
        Self {
            success: true,
            tool_name: tool_name.to_string(),
            result: Some(result),
            error: None,
        }
    }

    fn err(tool_name: &str, error: String) -> Self {
        Self {
            success: false,
            tool_name: tool_name.to_string(),
            result: None,
            error: Some(error),
        }
    }
}

/// Dispatcher over a tool registry. All execution is explicit and
/// synchronous.
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: ToolRegistry,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Mutable registry access for setup. The registry must be treated as
    /// read-only once the kernel starts accepting requests.
    pub fn registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.registry
    }

    /// Pre-flight validation of a tool call. Empty list means dispatchable.
    pub fn validate_tool_call(&self, tool_call: &ToolCall) -> Vec<String> {
        let mut errors = Vec::new();

        if tool_call.name.is_empty() {
            errors.push("Tool name is required".to_string());
            return errors;
        }
        if !self.registry.has(&tool_call.name) {
            errors.push(format!("Tool '{}' is not registered", tool_call.name));
        }

        errors
    }

    /// Execute a tool call. Never panics and never returns a bare error;
    /// every failure is folded into the result.
    pub fn execute(&self, tool_call: &ToolCall) -> ExecutionResult {
        let errors = self.validate_tool_call(tool_call);
        if !errors.is_empty() {
            return ExecutionResult::err(&tool_call.name, errors.join("; "));
        }

        let invoked = catch_unwind(AssertUnwindSafe(|| {
            self.registry.invoke(&tool_call.name, &tool_call.params)
        }));
        match invoked {
            Ok(Ok(value)) => ExecutionResult::ok(&tool_call.name, value),
            Ok(Err(err)) => {
                ExecutionResult::err(&tool_call.name, format!("{}: {}", err.code(), err))
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "handler panicked".to_string());
                let err = ToolError::Failed {
                    name: tool_call.name.clone(),
                    message,
                };
                ExecutionResult::err(&tool_call.name, format!("{}: {}", err.code(), err))
            }
        }
    }

    /// All dispatchable tool names, sorted.
    pub fn list_available_tools(&self) -> Vec<String> {
        self.registry.list_tools()
    }
}
