// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Accelerator runtime abstraction
//!
//! The trait below is the seam between vramguard and the external
//! accelerator runtime. Everything above it (the capability facade, the
//! monitor) tolerates any failure from these calls; everything below it maps
//! library-specific errors into [`RuntimeError`].

use crate::error::RuntimeError;

/// Memory statistics for a single device, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryInfo {
    /// Total device memory
    pub total: u64,
    /// Memory not allocated by any process
    pub free: u64,
    /// Memory currently in use
    pub used: u64,
}

impl MemoryInfo {
    /// Free memory in whole megabytes
    pub fn free_mb(&self) -> u64 {
        self.free / (1024 * 1024)
    }

    /// Total memory in whole megabytes
    pub fn total_mb(&self) -> u64 {
        self.total / (1024 * 1024)
    }

    /// Used memory in whole megabytes
    pub fn used_mb(&self) -> u64 {
        self.used / (1024 * 1024)
    }
}

/// Interface to the external accelerator runtime.
///
/// Implementations map their library's failures to [`RuntimeError`]; callers
/// decide whether a failure is fatal (the monitor's startup checks) or
/// converted into a safe default (the capability facade).
#[cfg_attr(test, mockall::automock)]
pub trait AcceleratorRuntime: Send {
    /// Whether the runtime reports at least one usable device
    fn is_available(&self) -> Result<bool, RuntimeError>;

    /// Number of accelerator devices visible to the runtime
    fn device_count(&self) -> Result<u32, RuntimeError>;

    /// Index of the active accelerator device
    fn current_device(&self) -> Result<u32, RuntimeError>;

    /// Marketing name of the given device
    fn device_name(&self, index: u32) -> Result<String, RuntimeError>;

    /// Memory statistics for the given device
    fn memory_info(&self, index: u32) -> Result<MemoryInfo, RuntimeError>;

    /// Flush pending work so memory accounting is accurate
    fn synchronize(&self) -> Result<(), RuntimeError>;

    /// Return unused cached allocations to the system allocator
    fn release_cached_memory(&self, index: u32) -> Result<(), RuntimeError>;

    /// Release inter-process memory handles held by the runtime
    fn collect_ipc_handles(&self) -> Result<(), RuntimeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_info_megabyte_conversion() {
        let info = MemoryInfo {
            total: 8 * 1024 * 1024 * 1024,
            free: 3 * 1024 * 1024 * 1024,
            used: 5 * 1024 * 1024 * 1024,
        };
        assert_eq!(info.total_mb(), 8192);
        assert_eq!(info.free_mb(), 3072);
        assert_eq!(info.used_mb(), 5120);
    }

    #[test]
    fn test_memory_info_truncates_partial_megabytes() {
        let info = MemoryInfo {
            total: 1024 * 1024 + 1,
            free: 1024 * 1024 - 1,
            used: 2,
        };
        assert_eq!(info.total_mb(), 1);
        assert_eq!(info.free_mb(), 0);
        assert_eq!(info.used_mb(), 0);
    }
}
