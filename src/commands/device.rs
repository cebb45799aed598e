// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Device capability report command

use serde::Serialize;
use sysinfo::System;
use tracing::debug;

use crate::cli::args::{DeviceArgs, OutputFormat};
use crate::device::DeviceCapability;
use crate::error::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceReport {
    default_device: String,
    available: bool,
    device_count: u32,
    fallback_latched: bool,
    host_ram_gb: u64,
    devices: Vec<DeviceEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceEntry {
    index: u32,
    name: String,
    total_mb: u64,
    free_mb: u64,
    used_mb: u64,
}

fn build_report(capability: &DeviceCapability) -> DeviceReport {
    let available = capability.is_available();
    let device_count = capability.device_count();

    let mut devices = Vec::new();
    if available {
        if let Some(runtime) = capability.runtime() {
            for index in 0..device_count {
                let name = runtime
                    .device_name(index)
                    .unwrap_or_else(|_| "unknown".to_string());
                match runtime.memory_info(index) {
                    Ok(memory) => devices.push(DeviceEntry {
                        index,
                        name,
                        total_mb: memory.total_mb(),
                        free_mb: memory.free_mb(),
                        used_mb: memory.used_mb(),
                    }),
                    Err(err) => debug!("skipping device {index} in report: {err}"),
                }
            }
        }
    }

    let mut sys = System::new();
    sys.refresh_memory();
    let host_ram_gb = sys.total_memory() / (1024 * 1024 * 1024);

    DeviceReport {
        default_device: capability.default_device().to_string(),
        available,
        device_count,
        fallback_latched: capability.tripped(),
        host_ram_gb,
        devices,
    }
}

/// Execute the device command
pub fn execute(args: &DeviceArgs, format: &OutputFormat, force_cpu: bool) -> Result<()> {
    let capability = if force_cpu {
        DeviceCapability::force_cpu()
    } else {
        DeviceCapability::detect()
    };

    let report = build_report(&capability);

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n=== vramguard Device Capability ===\n");
    println!("Default device: {}", report.default_device);
    println!(
        "Accelerator: {}",
        if report.available {
            "available"
        } else {
            "unavailable (CPU fallback)"
        }
    );
    println!("Device count: {}", report.device_count);
    if report.fallback_latched {
        println!("Fallback latch: set (runtime failed during probing)");
    }
    println!("Host RAM: {}GB", report.host_ram_gb);

    if args.detailed && !report.devices.is_empty() {
        println!("\n=== Devices ===");
        for device in &report.devices {
            println!(
                "  cuda:{} {} ({} MB free of {} MB)",
                device.index, device.name, device.free_mb, device.total_mb
            );
        }
    }

    println!();

    Ok(())
}
