// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! NVML-backed accelerator runtime
//!
//! `nvml-wrapper` loads `libnvidia-ml` at runtime, so a machine without
//! NVIDIA drivers fails at [`NvmlRuntime::init`] rather than at build or
//! link time. That maps directly onto the "runtime absent" failure class the
//! capability facade is designed around.

use nvml_wrapper::error::NvmlError;
use nvml_wrapper::Nvml;
use tracing::debug;

use super::runtime::{AcceleratorRuntime, MemoryInfo};
use crate::error::RuntimeError;

/// Production accelerator runtime backed by NVML.
pub struct NvmlRuntime {
    nvml: Nvml,
}

impl NvmlRuntime {
    /// Load and initialize NVML.
    ///
    /// Fails with [`RuntimeError::Unavailable`] when the shared library is
    /// missing or refuses to initialize (no driver, no supported GPU).
    pub fn init() -> Result<Self, RuntimeError> {
        Nvml::init()
            .map(|nvml| Self { nvml })
            .map_err(|err| RuntimeError::Unavailable(err.to_string()))
    }

    fn query_err(err: NvmlError) -> RuntimeError {
        RuntimeError::Query(err.to_string())
    }
}

impl AcceleratorRuntime for NvmlRuntime {
    fn is_available(&self) -> Result<bool, RuntimeError> {
        Ok(self.nvml.device_count().map_err(Self::query_err)? > 0)
    }

    fn device_count(&self) -> Result<u32, RuntimeError> {
        self.nvml.device_count().map_err(Self::query_err)
    }

    fn current_device(&self) -> Result<u32, RuntimeError> {
        // NVML has no notion of a calling context, so the primary device is
        // index 0 whenever at least one device exists.
        if self.device_count()? == 0 {
            return Err(RuntimeError::Query(
                "no accelerator devices present".to_string(),
            ));
        }
        Ok(0)
    }

    fn device_name(&self, index: u32) -> Result<String, RuntimeError> {
        self.nvml
            .device_by_index(index)
            .and_then(|device| device.name())
            .map_err(Self::query_err)
    }

    fn memory_info(&self, index: u32) -> Result<MemoryInfo, RuntimeError> {
        let info = self
            .nvml
            .device_by_index(index)
            .and_then(|device| device.memory_info())
            .map_err(Self::query_err)?;
        Ok(MemoryInfo {
            total: info.total,
            free: info.free,
            used: info.used,
        })
    }

    fn synchronize(&self) -> Result<(), RuntimeError> {
        // NVML memory counters are maintained by the driver; there is no
        // pending work to flush.
        Ok(())
    }

    fn release_cached_memory(&self, index: u32) -> Result<(), RuntimeError> {
        // NVML is a monitoring API with no allocator control. Backends that
        // own an allocator implement this for real.
        debug!("cache release requested for device {index}; NVML exposes no allocator control");
        Ok(())
    }

    fn collect_ipc_handles(&self) -> Result<(), RuntimeError> {
        debug!("IPC handle collection requested; NVML exposes no allocator control");
        Ok(())
    }
}
