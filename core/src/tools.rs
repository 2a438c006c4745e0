/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Tool registry.
//!
//! Tools are deterministic functions invoked through the kernel. Every tool
//! must be explicitly registered under a case-sensitive, non-empty name;
//! there is no dynamic discovery and no import-by-name. The registry is
//! mutable only during setup; during `submit` it is read-only.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ToolError;

/// Handler signature: a pure-ish function over a parameter mapping.
///
/// A handler reports its own failures as `Err(message)`; the registry wraps
/// them into `ToolError::Failed` so nothing escapes the dispatcher.
pub type ToolHandler = Box<dyn Fn(&Map<String, Value>) -> Result<Value, String> + Send + Sync>;

/// Definition of a registered tool.
pub struct Tool {
    pub name: String,
    pub description: String,
    pub handler: ToolHandler,
    /// Parameter name to expected-type label, for documentation only.
    pub param_schema: BTreeMap<String, String>,
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("param_schema", &self.param_schema)
            .finish_non_exhaustive()
    }
}

/// Registry of available tools.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Tool>,
}

impl ToolRegistry {
    /// New empty registry.
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool. Fails if the name is empty or already taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: ToolHandler,
        description: impl Into<String>,
        param_schema: BTreeMap<String, String>,
    ) -> Result<(), ToolError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ToolError::EmptyName);
        }
        if self.tools.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered(name));
        }
        self.tools.insert(
            name.clone(),
            Tool {
                name,
                description: description.into(),
                handler,
                param_schema,
            },
        );
        Ok(())
    }

    /// Unregister a tool. Fails if absent.
    pub fn unregister(&mut self, name: &str) -> Result<(), ToolError> {
        if self.tools.remove(name).is_none() {
            return Err(ToolError::NotRegistered(name.to_string()));
        }
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// True when a tool with this name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All registered tool names, sorted.
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Invoke a tool with a parameter mapping.
    pub fn invoke(&self, name: &str, params: &Map<String, Value>) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::Unknown(name.to_string()))?;
        (tool.handler)(params).map_err(|message| ToolError::Failed {
            name: name.to_string(),
            message,
        })
    }
}

/// Registry pre-loaded with the built-in `echo` and `add` tools.
pub fn create_default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    let echo: ToolHandler = Box::new(|params| {
        let text = params
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| "missing required string parameter 'text'".to_string())?;
        Ok(Value::String(text.to_string()))
    });
    let mut echo_schema = BTreeMap::new();
    echo_schema.insert("text".to_string(), "string".to_string());
    // Names are fixed; collisions in a fresh registry cannot happen.
    let _ = registry.register("echo", echo, "Return the input text unchanged", echo_schema);

    let add: ToolHandler = Box::new(|params| {
        let int_param = |key: &str| -> Result<i64, String> {
            params
                .get(key)
                .and_then(Value::as_i64)
                .ok_or_else(|| format!("missing required integer parameter '{}'", key))
        };
        let a = int_param("a")?;
        let b = int_param("b")?;
        Ok(Value::from(a + b))
    });
    let mut add_schema = BTreeMap::new();
    add_schema.insert("a".to_string(), "integer".to_string());
    add_schema.insert("b".to_string(), "integer".to_string());
    let _ = registry.register("add", add, "Add two integers", add_schema);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_register_and_invoke() {
        let mut registry = ToolRegistry::new();
        registry
            .register(
                "upper",
                Box::new(|p| {
                    let text = p.get("text").and_then(Value::as_str).unwrap_or_default();
                    Ok(Value::String(text.to_uppercase()))
                }),
                "Uppercase the input",
                BTreeMap::new(),
            )
            .expect("register failed");

        let result = registry
            .invoke("upper", &params(&[("text", json!("hi"))]))
            .expect("invoke failed");
        assert_eq!(result, json!("HI"));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = create_default_registry();
        let result = registry.register(
            "echo",
            Box::new(|_| Ok(Value::Null)),
            "",
            BTreeMap::new(),
        );
        assert_eq!(result, Err(ToolError::AlreadyRegistered("echo".into())));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = ToolRegistry::new();
        let result = registry.register("", Box::new(|_| Ok(Value::Null)), "", BTreeMap::new());
        assert_eq!(result, Err(ToolError::EmptyName));
    }

    #[test]
    fn test_unregister() {
        let mut registry = create_default_registry();
        registry.unregister("echo").expect("unregister failed");
        assert!(!registry.has("echo"));
        assert_eq!(
            registry.unregister("echo"),
            Err(ToolError::NotRegistered("echo".into()))
        );
    }

    #[test]
    fn test_list_tools_sorted() {
        let registry = create_default_registry();
        assert_eq!(registry.list_tools(), vec!["add", "echo"]);
    }

    #[test]
    fn test_invoke_unknown_tool() {
        let registry = create_default_registry();
        let result = registry.invoke("missing", &Map::new());
        assert_eq!(result, Err(ToolError::Unknown("missing".into())));
    }

    #[test]
    fn test_echo_tool() {
        let registry = create_default_registry();
        let result = registry
            .invoke("echo", &params(&[("text", json!("hello"))]))
            .expect("invoke failed");
        assert_eq!(result, json!("hello"));
    }

    #[test]
    fn test_echo_missing_param_is_failed() {
        let registry = create_default_registry();
        let err = registry.invoke("echo", &Map::new()).expect_err("should fail");
        assert_eq!(err.code(), "TOOL_FAILED");
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn test_add_tool() {
        let registry = create_default_registry();
        let result = registry
            .invoke("add", &params(&[("a", json!(2)), ("b", json!(40))]))
            .expect("invoke failed");
        assert_eq!(result, json!(42));
    }

    #[test]
    fn test_add_rejects_non_integers() {
        let registry = create_default_registry();
        let err = registry
            .invoke("add", &params(&[("a", json!("2")), ("b", json!(40))]))
            .expect_err("should fail");
        assert_eq!(err.code(), "TOOL_FAILED");
    }

    #[test]
    fn test_case_sensitive_names() {
        let registry = create_default_registry();
        assert!(registry.has("echo"));
        assert!(!registry.has("Echo"));
    }
}
