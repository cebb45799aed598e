// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for vramguard
//!
//! Handles loading and saving user settings from ~/.vramguard/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::monitor::MonitorConfig;

/// Main settings structure, stored in ~/.vramguard/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Monitor loop defaults, overridable per-run from the CLI
    #[serde(default)]
    pub monitor: MonitorSettings,
}

/// Persisted defaults for the memory-pressure monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Sampling interval in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: f64,

    /// Free-memory threshold (MB) that triggers a cache release
    #[serde(default = "default_threshold_mb")]
    pub threshold_mb: u64,

    /// Diagnostic binary name or path
    #[serde(default = "default_nvidia_smi")]
    pub nvidia_smi: String,

    /// Whether threshold crossings trigger a cache release
    #[serde(default = "default_empty_cache")]
    pub empty_cache: bool,
}

fn default_interval_secs() -> f64 {
    1.0
}

fn default_threshold_mb() -> u64 {
    3400
}

fn default_nvidia_smi() -> String {
    "nvidia-smi".to_string()
}

fn default_empty_cache() -> bool {
    true
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            threshold_mb: default_threshold_mb(),
            nvidia_smi: default_nvidia_smi(),
            empty_cache: default_empty_cache(),
        }
    }
}

impl MonitorSettings {
    /// Convert to a runtime monitor configuration.
    pub fn to_config(&self) -> MonitorConfig {
        MonitorConfig {
            interval_secs: self.interval_secs,
            threshold_mb: self.threshold_mb,
            nvidia_smi: self.nvidia_smi.clone(),
            empty_cache: self.empty_cache,
        }
    }
}

impl Settings {
    /// Get the vramguard home directory (~/.vramguard or $VRAMGUARD_HOME).
    pub fn guard_home() -> PathBuf {
        if let Ok(home) = std::env::var("VRAMGUARD_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vramguard")
    }

    /// Get the default settings file path.
    pub fn default_path() -> PathBuf {
        Self::guard_home().join("settings.json")
    }

    /// Load settings from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from a specific path; a missing file yields defaults.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    /// Save settings to a specific path, creating parent directories.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
