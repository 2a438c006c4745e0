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

use ark_arbiter::replay::{replay_and_verify, verify_evidence_bundle};
use ark_arbiter::types::KernelRequest;
use ark_arbiter::validate::validate_request;
use ark_arbiter::variants::Variant;

use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let code = match args.get(1).map(String::as_str) {
        Some("info") => cmd_info(args.get(2).map(String::as_str)),
        Some("validate") => match args.get(2) {
            Some(path) => cmd_validate(path),
            None => usage(),
        },
        Some("replay") => match args.get(2) {
            Some(path) => cmd_replay(path),
            None => usage(),
        },
        _ => usage(),
    };
    process::exit(code);
}

fn usage() -> i32 {
    println!("Usage: arbiter <command> [args]");
    println!();
    println!("Commands:");
    println!("  info [variant]       Describe a kernel variant (default: strict)");
    println!("  validate <file>      Validate a request JSON file");
    println!("  replay <file>        Replay and verify an audit ledger or bundle");
    1
}

fn cmd_info(variant_arg: Option<&str>) -> i32 {
    let variant: Variant = match variant_arg.unwrap_or("strict").parse() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let description = match variant {
        Variant::Strict => "Maximum enforcement. Requires tool_call for execution.",
        Variant::Permissive => {
            "Relaxed ambiguity thresholds. Accepts intent-only requests."
        }
        Variant::EvidenceFirst => "Requires evidence field for ALLOW decisions.",
        Variant::DualChannel => {
            "Requires constraints dict with scope, non_goals, success_criteria."
        }
    };

    println!("Variant: {}", variant);
    println!("Fail-Closed: true");
    println!("Require Jurisdiction: true");
    println!("Require Audit: true");
    println!("Description: {}", description);
    0
}

fn cmd_validate(path: &str) -> i32 {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: failed to read {}: {}", path, e);
            return 1;
        }
    };

    let request: KernelRequest = match serde_json::from_str(&content) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: invalid request JSON: {}", e);
            return 1;
        }
    };

    let errors = validate_request(&request);
    if errors.is_empty() {
        println!("Validation passed.");
        0
    } else {
        println!("Validation failed:");
        for error in &errors {
            println!("  - {}", error);
        }
        1
    }
}

fn cmd_replay(path: &str) -> i32 {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: failed to read {}: {}", path, e);
            return 1;
        }
    };

    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: invalid JSON: {}", e);
            return 1;
        }
    };

    // Accept either a bare entry array or a full evidence bundle.
    let (is_valid, entries_verified, errors) = match &value {
        serde_json::Value::Array(entries) => {
            let (is_valid, errors) = replay_and_verify(entries, None);
            (is_valid, entries.len(), errors)
        }
        _ => {
            let result = verify_evidence_bundle(&value);
            (result.is_valid, result.entries_verified, result.errors)
        }
    };

    if is_valid {
        println!("Ledger valid. {} entries verified.", entries_verified);
        0
    } else {
        println!("Ledger verification failed:");
        for error in &errors {
            println!("  - {}", error);
        }
        1
    }
}
