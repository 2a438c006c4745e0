/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Arbiter.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Async facade over the synchronous kernel.
//!
//! There is no separate async state machine: `AsyncKernel` serializes calls
//! into the same pipeline through a tokio mutex, so every invariant of the
//! synchronous kernel carries over unchanged. Ledger entries appear in the
//! order requests acquired the lock.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{error::Elapsed, sleep, timeout, Duration};

use crate::error::KernelError;
use crate::kernel::Kernel;
use crate::types::{EvidenceBundle, KernelReceipt, KernelRequest, KernelState, ReceiptStatus};

/// Shared-handle async wrapper around a [`Kernel`].
#[derive(Clone)]
pub struct AsyncKernel {
    inner: Arc<Mutex<Kernel>>,
}

impl AsyncKernel {
    /// Wrap an already booted (or about-to-be-booted) kernel.
    pub fn new(kernel: Kernel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(kernel)),
        }
    }

    /// Submit a request; waits for exclusive access to the pipeline.
    pub async fn submit(&self, request: &KernelRequest) -> KernelReceipt {
        let mut kernel = self.inner.lock().await;
        kernel.submit(request)
    }

    /// Halt the kernel once the pipeline is free.
    pub async fn halt(&self, reason: &str) -> Result<KernelReceipt, KernelError> {
        let mut kernel = self.inner.lock().await;
        kernel.halt(reason)
    }

    /// Export the evidence bundle under the guard.
    pub async fn export_evidence(&self) -> EvidenceBundle {
        let kernel = self.inner.lock().await;
        kernel.export_evidence()
    }

    /// Observable kernel state.
    pub async fn state(&self) -> KernelState {
        let kernel = self.inner.lock().await;
        kernel.state()
    }

    /// Run a closure with exclusive kernel access (clock advancement,
    /// registry setup between submits).
    pub async fn with_kernel<R>(&self, f: impl FnOnce(&mut Kernel) -> R) -> R {
        let mut kernel = self.inner.lock().await;
        f(&mut kernel)
    }
}

/// Submit requests one after another, preserving order.
///
/// The kernel serializes submissions anyway, so batch submission is about
/// ergonomics, not parallelism: receipts come back in request order and the
/// ledger records the same order.
pub async fn submit_batch(kernel: &AsyncKernel, requests: &[KernelRequest]) -> Vec<KernelReceipt> {
    let mut receipts = Vec::with_capacity(requests.len());
    for request in requests {
        receipts.push(kernel.submit(request).await);
    }
    receipts
}

/// Submit with a wall-time limit. On timeout the submission may still
/// complete inside the kernel; the ledger stays consistent either way.
pub async fn submit_with_timeout(
    kernel: &AsyncKernel,
    request: &KernelRequest,
    limit: Duration,
) -> Result<KernelReceipt, Elapsed> {
    timeout(limit, kernel.submit(request)).await
}

/// Submit with retries on FAILED receipts, doubling the backoff each time.
///
/// Rejections are final (a DENY will not change on retry), so only
/// execution failures are retried. Returns the last receipt.
pub async fn submit_with_retry(
    kernel: &AsyncKernel,
    request: &KernelRequest,
    max_retries: u32,
    initial_backoff: Duration,
) -> KernelReceipt {
    let mut receipt = kernel.submit(request).await;
    let mut backoff = initial_backoff;
    for _ in 0..max_retries {
        if receipt.status != ReceiptStatus::Failed {
            return receipt;
        }
        sleep(backoff).await;
        backoff *= 2;
        receipt = kernel.submit(request).await;
    }
    receipt
}
