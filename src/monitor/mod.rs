// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Memory-pressure monitor
//!
//! A blocking poll loop that samples accelerator memory at a fixed interval,
//! prints a timestamped status line per sample, and releases cached device
//! memory when free memory drops under the configured threshold.

pub mod smi;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::device::AcceleratorRuntime;
use crate::error::Result;

/// Sleep floor, regardless of a smaller or zero configured interval.
pub const MIN_INTERVAL_SECS: f64 = 0.1;

/// Monitor loop configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Sampling interval in seconds
    pub interval_secs: f64,
    /// Free-memory threshold (MB) that triggers a cache release
    pub threshold_mb: u64,
    /// Diagnostic binary name or path
    pub nvidia_smi: String,
    /// Whether threshold crossings trigger a cache release
    pub empty_cache: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 1.0,
            threshold_mb: 3400,
            nvidia_smi: "nvidia-smi".to_string(),
            empty_cache: true,
        }
    }
}

impl MonitorConfig {
    /// Effective sleep duration, clamped to the floor.
    ///
    /// The comparison is written so NaN also falls back to the floor.
    pub fn interval(&self) -> Duration {
        let secs = if self.interval_secs >= MIN_INTERVAL_SECS {
            self.interval_secs
        } else {
            MIN_INTERVAL_SECS
        };
        Duration::from_secs_f64(secs)
    }
}

/// One iteration's observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// When the sample was taken
    pub timestamp: DateTime<Local>,
    /// Free device memory, whole megabytes
    pub free_mb: u64,
    /// Total device memory, whole megabytes
    pub total_mb: u64,
    /// Diagnostic binary output, when the binary was found
    pub smi_line: Option<String>,
    /// Whether this iteration released cached memory
    pub cache_released: bool,
}

impl Sample {
    /// Render the status line for this sample.
    pub fn render(&self) -> String {
        let timestamp = self.timestamp.format("%H:%M:%S");
        let usage = format!(
            "{:.1}/{:.1} GB used",
            (self.total_mb - self.free_mb) as f64 / 1024.0,
            self.total_mb as f64 / 1024.0
        );
        match self.smi_line.as_deref() {
            Some(line) => format!("{timestamp} | {line} | {usage}"),
            None => format!("{timestamp} | {usage}"),
        }
    }
}

/// Polls device 0 and relieves memory pressure past the threshold.
pub struct Monitor {
    runtime: Box<dyn AcceleratorRuntime>,
    config: MonitorConfig,
}

impl Monitor {
    pub fn new(runtime: Box<dyn AcceleratorRuntime>, config: MonitorConfig) -> Self {
        Self { runtime, config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Take one sample, releasing cached memory if the reading qualifies.
    pub fn sample_once(&self) -> Result<Sample> {
        self.runtime.synchronize()?;
        let memory = self.runtime.memory_info(0)?;
        let smi_line = smi::query(&self.config.nvidia_smi);

        let free_mb = memory.free_mb();
        let total_mb = memory.total_mb();

        let mut cache_released = false;
        if free_mb < self.config.threshold_mb && self.config.empty_cache {
            self.runtime.release_cached_memory(0)?;
            self.runtime.collect_ipc_handles()?;
            cache_released = true;
            debug!("cache released at {free_mb} MB free (threshold {} MB)", self.config.threshold_mb);
        }

        Ok(Sample {
            timestamp: Local::now(),
            free_mb,
            total_mb,
            smi_line,
            cache_released,
        })
    }

    /// Run the poll loop until the interrupt flag clears.
    pub fn run(&self, running: &AtomicBool) -> Result<()> {
        while running.load(Ordering::SeqCst) {
            let sample = self.sample_once()?;
            println!("{}", sample.render());
            if sample.cache_released {
                eprintln!(
                    "[vramguard] Cache released (free={} MB < {} MB)",
                    sample.free_mb, self.config.threshold_mb
                );
            }
            std::thread::sleep(self.config.interval());
        }
        eprintln!("[vramguard] Stopped.");
        Ok(())
    }
}
