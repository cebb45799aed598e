// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Device capability facade
//!
//! [`DeviceCapability`] is the API the rest of the process calls in place of
//! the raw accelerator runtime. Every method returns a usable value; runtime
//! failures are converted into CPU defaults and latch a one-way flag that
//! short-circuits all further probing for the lifetime of the process.
//!
//! Some environments report availability as true while a subsequent
//! device-count query fails, so `is_available` performs that follow-up probe
//! itself and treats its failure the same way.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use super::runtime::AcceleratorRuntime;
use super::{Device, NvmlRuntime};
use crate::error::RuntimeError;

/// Environment variable controlling accelerator visibility.
pub const VISIBILITY_ENV: &str = "CUDA_VISIBLE_DEVICES";

/// Safe facade over an optional accelerator runtime.
pub struct DeviceCapability {
    runtime: Option<Box<dyn AcceleratorRuntime>>,
    tripped: AtomicBool,
}

impl DeviceCapability {
    /// Probe for the accelerator runtime; absence is not an error.
    pub fn detect() -> Self {
        match NvmlRuntime::init() {
            Ok(runtime) => Self::with_runtime(Box::new(runtime)),
            Err(err) => {
                debug!("accelerator runtime not available: {err}");
                Self::without_runtime()
            }
        }
    }

    /// Build a facade over a specific runtime.
    pub fn with_runtime(runtime: Box<dyn AcceleratorRuntime>) -> Self {
        Self {
            runtime: Some(runtime),
            tripped: AtomicBool::new(false),
        }
    }

    /// Build a facade with no runtime; all queries return CPU defaults.
    pub fn without_runtime() -> Self {
        Self {
            runtime: None,
            tripped: AtomicBool::new(false),
        }
    }

    /// Force CPU-only operation.
    ///
    /// Clears the accelerator visibility variable first so child processes
    /// inherit the restriction, then skips runtime probing entirely.
    pub fn force_cpu() -> Self {
        std::env::set_var(VISIBILITY_ENV, "");
        Self::without_runtime()
    }

    /// Whether the failure latch has been set.
    pub fn tripped(&self) -> bool {
        self.tripped.load(Ordering::SeqCst)
    }

    /// Read-only access to the underlying runtime, for diagnostics.
    pub fn runtime(&self) -> Option<&dyn AcceleratorRuntime> {
        self.runtime.as_deref()
    }

    fn trip(&self, context: &str, err: &RuntimeError) {
        if !self.tripped.swap(true, Ordering::SeqCst) {
            warn!("{context} failed, falling back to CPU: {err}");
        }
    }

    /// Whether a usable accelerator device is present.
    ///
    /// Never fails: a runtime error latches the facade and reports false.
    pub fn is_available(&self) -> bool {
        if self.tripped() {
            return false;
        }
        let Some(runtime) = self.runtime.as_deref() else {
            return false;
        };
        match runtime.is_available() {
            Ok(false) => false,
            Ok(true) => match runtime.device_count() {
                // A clean count of zero is not a runtime failure; a later
                // probe is allowed to succeed.
                Ok(count) => count > 0,
                Err(err) => {
                    self.trip("device count probe", &err);
                    false
                }
            },
            Err(err) => {
                self.trip("availability check", &err);
                false
            }
        }
    }

    /// Number of usable accelerator devices; 0 once latched or on failure.
    pub fn device_count(&self) -> u32 {
        if self.tripped() {
            return 0;
        }
        let Some(runtime) = self.runtime.as_deref() else {
            return 0;
        };
        match runtime.device_count() {
            Ok(count) => count,
            Err(err) => {
                self.trip("device count query", &err);
                0
            }
        }
    }

    /// The active device; CPU once latched or on failure.
    pub fn current_device(&self) -> Device {
        if self.tripped() {
            return Device::Cpu;
        }
        let Some(runtime) = self.runtime.as_deref() else {
            return Device::Cpu;
        };
        match runtime.current_device() {
            Ok(index) => Device::Cuda(index),
            Err(err) => {
                self.trip("current device query", &err);
                Device::Cpu
            }
        }
    }

    /// The device new work should run on.
    ///
    /// Delegates to the accelerator only when it is verifiably usable and
    /// still falls back to CPU if the delegated query fails.
    pub fn default_device(&self) -> Device {
        if !self.is_available() {
            return Device::Cpu;
        }
        self.current_device()
    }
}
