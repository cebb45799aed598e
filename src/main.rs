// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! vramguard - GPU capability fallback and VRAM pressure monitor
//!
//! Entry point for the vramguard CLI application.

use clap::Parser;

use vramguard::cli::{Cli, Commands, DeviceArgs};
use vramguard::commands;
use vramguard::config::Settings;
use vramguard::error::Result;

fn main() {
    if let Err(err) = run() {
        eprintln!("[vramguard] {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing. `RUST_LOG` takes precedence; `-v` enables the
    // crate's own debug diagnostics without requiring target names.
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    if cli.verbose > 0 {
        if let Ok(directive) = "vramguard=debug".parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    match cli.command {
        None => commands::device::execute(&DeviceArgs::default(), &cli.format, cli.force_cpu),
        Some(Commands::Device(args)) => commands::device::execute(&args, &cli.format, cli.force_cpu),
        Some(Commands::Monitor(args)) => commands::monitor::execute(&args, &settings, cli.force_cpu),
    }
}
