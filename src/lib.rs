// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! vramguard - GPU capability fallback and VRAM pressure monitoring.
//!
//! This crate exposes two loosely related pieces:
//! - `device`: a capability facade that always yields a usable device value,
//!   degrading to CPU when the accelerator runtime is absent or unstable
//! - `monitor`: a polling loop that samples GPU memory and releases cached
//!   allocations when free memory drops below a threshold
//!
//! The `vramguard` binary (`src/main.rs`) wires both to a small CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod monitor;

pub use error::{GuardError, Result};
