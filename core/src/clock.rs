/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Deterministic time for the kernel.
//!
//! The pipeline never reads the wall clock. All timestamps come from a
//! `VirtualClock` owned by the kernel and advanced by the host, so two
//! kernels driven with the same clock schedule stamp identical times and
//! therefore produce identical ledgers.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::KernelError;

/// Virtual monotonic millisecond clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualClock {
    current_ms: i64,
}

impl VirtualClock {
    /// Create a clock starting at `initial_ms`.
    pub fn new(initial_ms: i64) -> Self {
        Self {
            current_ms: initial_ms,
        }
    }

    /// Current time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.current_ms
    }

    /// Advance the clock by `delta_ms`. The clock cannot move backward.
    pub fn advance(&mut self, delta_ms: i64) -> Result<(), KernelError> {
        if delta_ms < 0 {
            return Err(KernelError::Clock("clock cannot move backward".into()));
        }
        self.current_ms += delta_ms;
        Ok(())
    }

    /// Set the clock to an absolute time. The clock cannot move backward.
    pub fn set(&mut self, ts_ms: i64) -> Result<(), KernelError> {
        if ts_ms < self.current_ms {
            return Err(KernelError::Clock("clock cannot move backward".into()));
        }
        self.current_ms = ts_ms;
        Ok(())
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new(0)
    }
}

/// True when `ts_ms` is not in the future relative to `clock`.
pub fn validate_timestamp(ts_ms: i64, clock: &VirtualClock) -> bool {
    ts_ms <= clock.now_ms()
}

/// Render a millisecond timestamp as an RFC 3339 string (UTC).
///
/// Display-only; nothing on the hashed path consumes this.
pub fn timestamp_to_iso(ts_ms: i64) -> Result<String, KernelError> {
    let dt: DateTime<Utc> = Utc
        .timestamp_millis_opt(ts_ms)
        .single()
        .ok_or_else(|| KernelError::Clock(format!("timestamp out of range: {}", ts_ms)))?;
    Ok(dt.to_rfc3339())
}

/// Parse an RFC 3339 string into a millisecond timestamp.
pub fn iso_to_timestamp(iso: &str) -> Result<i64, KernelError> {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| KernelError::Clock(format!("invalid timestamp '{}': {}", iso, e)))
}
