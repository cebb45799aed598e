// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Memory-pressure monitor command

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cli::args::MonitorArgs;
use crate::config::Settings;
use crate::device::{AcceleratorRuntime, NvmlRuntime};
use crate::error::{GuardError, Result, RuntimeError};
use crate::monitor::{Monitor, MonitorConfig};

/// Merge persisted settings with per-run CLI overrides.
fn resolve_config(args: &MonitorArgs, settings: &Settings) -> MonitorConfig {
    let base = &settings.monitor;
    MonitorConfig {
        interval_secs: args.interval.unwrap_or(base.interval_secs),
        threshold_mb: args.threshold_mb.unwrap_or(base.threshold_mb),
        nvidia_smi: args
            .nvidia_smi
            .clone()
            .unwrap_or_else(|| base.nvidia_smi.clone()),
        empty_cache: !args.no_empty_cache && base.empty_cache,
    }
}

/// Execute the monitor command
pub fn execute(args: &MonitorArgs, settings: &Settings, force_cpu: bool) -> Result<()> {
    if force_cpu {
        return Err(RuntimeError::Unavailable(
            "accelerator disabled by --force-cpu; nothing to monitor".to_string(),
        )
        .into());
    }

    // Startup preconditions: an unusable runtime is fatal here, unlike in
    // the capability facade.
    let runtime = NvmlRuntime::init()?;
    if !runtime.is_available()? {
        return Err(RuntimeError::Unavailable(
            "no available accelerator device; nothing to monitor".to_string(),
        )
        .into());
    }

    let config = resolve_config(args, settings);
    let name = runtime
        .device_name(0)
        .unwrap_or_else(|_| "unknown GPU".to_string());
    eprintln!("[vramguard] Monitoring {name}");
    eprintln!(
        "[vramguard] Interval={:.2}s threshold={} MB",
        config.interval_secs, config.threshold_mb
    );

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        flag.store(false, Ordering::SeqCst);
    })
    .map_err(|err| GuardError::Config(format!("failed to install interrupt handler: {err}")))?;

    let monitor = Monitor::new(Box::new(runtime), config);
    monitor.run(&running)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_config_uses_settings_defaults() {
        let args = MonitorArgs::default();
        let settings = Settings::default();
        let config = resolve_config(&args, &settings);
        assert_eq!(config, MonitorConfig::default());
    }

    #[test]
    fn test_resolve_config_cli_overrides() {
        let args = MonitorArgs {
            interval: Some(0.25),
            threshold_mb: Some(512),
            nvidia_smi: Some("/opt/bin/nvidia-smi".to_string()),
            no_empty_cache: false,
        };
        let settings = Settings::default();
        let config = resolve_config(&args, &settings);
        assert_eq!(config.interval_secs, 0.25);
        assert_eq!(config.threshold_mb, 512);
        assert_eq!(config.nvidia_smi, "/opt/bin/nvidia-smi");
        assert!(config.empty_cache);
    }

    #[test]
    fn test_resolve_config_no_empty_cache_flag() {
        let args = MonitorArgs {
            no_empty_cache: true,
            ..MonitorArgs::default()
        };
        let settings = Settings::default();
        let config = resolve_config(&args, &settings);
        assert!(!config.empty_cache);
    }

    #[test]
    fn test_resolve_config_settings_can_disable_cache_release() {
        let args = MonitorArgs::default();
        let mut settings = Settings::default();
        settings.monitor.empty_cache = false;
        let config = resolve_config(&args, &settings);
        assert!(!config.empty_cache);
    }

    #[test]
    fn test_execute_force_cpu_fails_fast() {
        let args = MonitorArgs::default();
        let settings = Settings::default();
        let err = execute(&args, &settings, true).unwrap_err();
        assert!(err.to_string().contains("force-cpu"));
    }
}
