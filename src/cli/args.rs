// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for vramguard.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// vramguard - GPU capability fallback and VRAM pressure monitor
#[derive(Parser, Debug)]
#[command(name = "vramguard")]
#[command(version, about = "GPU capability fallback and VRAM pressure monitor")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Force CPU-only operation (clears CUDA_VISIBLE_DEVICES)
    #[arg(long, global = true)]
    pub force_cpu: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll GPU memory and release cached allocations under pressure
    Monitor(MonitorArgs),

    /// Show the device capability report (default when no command given)
    #[command(alias = "dev")]
    Device(DeviceArgs),
}

/// Arguments for the monitor subcommand
#[derive(clap::Args, Debug, Default)]
pub struct MonitorArgs {
    /// Sampling interval in seconds (similar to nvidia-smi -l)
    #[arg(short, long)]
    pub interval: Option<f64>,

    /// Free VRAM threshold (in MB) that triggers a cache release
    #[arg(long = "threshold-mb")]
    pub threshold_mb: Option<u64>,

    /// Path to the nvidia-smi binary
    #[arg(long)]
    pub nvidia_smi: Option<String>,

    /// Disable cache-release calls; useful for passive monitoring
    #[arg(long)]
    pub no_empty_cache: bool,
}

/// Arguments for the device subcommand
#[derive(clap::Args, Debug, Default)]
pub struct DeviceArgs {
    /// Show per-device names and memory
    #[arg(short, long)]
    pub detailed: bool,
}

/// Output format for reports
#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}
