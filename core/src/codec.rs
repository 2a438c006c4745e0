/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Canonical serialization.
//!
//! Everything the kernel hashes funnels through `canonical_string`: objects
//! with keys sorted lexicographically by UTF-8 code units, arrays in order,
//! compact separators, UTF-8 strings with standard JSON escaping, stable
//! number formatting. The replay verifier uses these exact functions, so a
//! ledger produced here re-verifies byte-for-byte anywhere.
//!
//! The output is byte-compatible with
//! `json.dumps(v, sort_keys=True, separators=(",", ":"), ensure_ascii=False)`.

use serde_json::Value;

/// Canonical serialization of a JSON value.
pub fn canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Canonical serialization as raw bytes (UTF-8).
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    canonical_string(value).into_bytes()
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            // Sort explicitly rather than relying on the map's internal order.
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, &map[key]);
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// The hashed fields of one audit entry, borrowed from wherever they live.
///
/// `serialize_for_audit` is the single definition of an entry's hashed body;
/// both the ledger (producing) and the replay verifier (checking) call it.
#[derive(Debug, Clone, Copy)]
pub struct AuditBody<'a> {
    pub prev_hash: &'a str,
    pub ts_ms: i64,
    pub request_id: &'a str,
    pub actor: &'a str,
    pub intent: &'a str,
    pub decision: &'a str,
    pub state_from: &'a str,
    pub state_to: &'a str,
    pub tool_name: Option<&'a str>,
    pub params_hash: Option<&'a str>,
    pub evidence_hash: Option<&'a str>,
    pub error: Option<&'a str>,
}

/// Canonical serialization of an audit entry's hashed body.
///
/// Absent optional fields serialize as `null`; keys are sorted by the
/// canonical writer like any other object.
pub fn serialize_for_audit(body: &AuditBody<'_>) -> String {
    let opt = |v: Option<&str>| match v {
        Some(s) => Value::String(s.to_string()),
        None => Value::Null,
    };

    let mut map = serde_json::Map::new();
    map.insert("prev_hash".into(), Value::String(body.prev_hash.into()));
    map.insert("ts_ms".into(), Value::from(body.ts_ms));
    map.insert("request_id".into(), Value::String(body.request_id.into()));
    map.insert("actor".into(), Value::String(body.actor.into()));
    map.insert("intent".into(), Value::String(body.intent.into()));
    map.insert("decision".into(), Value::String(body.decision.into()));
    map.insert("state_from".into(), Value::String(body.state_from.into()));
    map.insert("state_to".into(), Value::String(body.state_to.into()));
    map.insert("tool_name".into(), opt(body.tool_name));
    map.insert("params_hash".into(), opt(body.params_hash));
    map.insert("evidence_hash".into(), opt(body.evidence_hash));
    map.insert("error".into(), opt(body.error));

    canonical_string(&Value::Object(map))
}
