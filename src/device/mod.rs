// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Device capability detection with graceful CPU fallback
//!
//! The facade in this module guarantees that device queries never fail: once
//! the accelerator runtime errors, all further queries short-circuit to safe
//! CPU defaults for the rest of the process.

pub mod capability;
pub mod nvml;
pub mod runtime;

pub use capability::DeviceCapability;
pub use nvml::NvmlRuntime;
pub use runtime::{AcceleratorRuntime, MemoryInfo};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A compute device handle.
///
/// `Cpu` is the fallback value, so the absence of the accelerator runtime is
/// representable without a stand-in object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    /// A CUDA device, by index
    Cuda(u32),
    /// Host CPU execution
    Cpu,
}

impl Device {
    /// Whether this is the CPU fallback device
    pub fn is_cpu(&self) -> bool {
        matches!(self, Device::Cpu)
    }

    /// Accelerator index, if any
    pub fn index(&self) -> Option<u32> {
        match self {
            Device::Cuda(index) => Some(*index),
            Device::Cpu => None,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cuda(index) => write!(f, "cuda:{}", index),
            Device::Cpu => write!(f, "cpu"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_display() {
        assert_eq!(Device::Cuda(0).to_string(), "cuda:0");
        assert_eq!(Device::Cuda(3).to_string(), "cuda:3");
        assert_eq!(Device::Cpu.to_string(), "cpu");
    }

    #[test]
    fn test_device_is_cpu() {
        assert!(Device::Cpu.is_cpu());
        assert!(!Device::Cuda(0).is_cpu());
    }

    #[test]
    fn test_device_index() {
        assert_eq!(Device::Cuda(2).index(), Some(2));
        assert_eq!(Device::Cpu.index(), None);
    }

    #[test]
    fn test_device_serialization() {
        let device = Device::Cuda(1);
        let json = serde_json::to_string(&device).unwrap();
        let parsed: Device = serde_json::from_str(&json).unwrap();
        assert_eq!(device, parsed);

        let cpu: Device = serde_json::from_str("\"Cpu\"").unwrap();
        assert_eq!(cpu, Device::Cpu);
    }
}
