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

#[cfg(not(target_arch = "wasm32"))]
pub mod async_kernel;
pub mod clock;
pub mod codec;
pub mod dispatcher;
pub mod error;
pub mod hashing;
pub mod kernel;
pub mod ledger;
pub mod machine;
pub mod policy;
pub mod replay;
pub mod rules;
pub mod tools;
pub mod transitions;
pub mod types;
pub mod validate;
pub mod variants;
