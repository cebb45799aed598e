// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use clap::Parser;
use vramguard::cli::{Cli, Commands};

#[test]
fn test_parse_no_command() {
    let cli = Cli::try_parse_from(["vramguard"]).expect("Valid command parsing");
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_monitor_command() {
    let cli = Cli::try_parse_from(["vramguard", "monitor"]).expect("Valid command parsing");
    assert!(matches!(cli.command, Some(Commands::Monitor(_))));
}

#[test]
fn test_parse_monitor_with_flags() {
    let args = [
        "vramguard",
        "monitor",
        "--interval",
        "0.5",
        "--threshold-mb",
        "2000",
        "--nvidia-smi",
        "/usr/local/bin/nvidia-smi",
        "--no-empty-cache",
    ];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    if let Some(Commands::Monitor(monitor_args)) = cli.command {
        assert_eq!(monitor_args.interval, Some(0.5));
        assert_eq!(monitor_args.threshold_mb, Some(2000));
        assert_eq!(
            monitor_args.nvidia_smi,
            Some("/usr/local/bin/nvidia-smi".to_string())
        );
        assert!(monitor_args.no_empty_cache);
    } else {
        panic!("Expected Monitor command");
    }
}

#[test]
fn test_parse_device_command() {
    let cli = Cli::try_parse_from(["vramguard", "device"]).expect("Valid command parsing");
    assert!(matches!(cli.command, Some(Commands::Device(_))));
}

#[test]
fn test_parse_device_alias() {
    let cli = Cli::try_parse_from(["vramguard", "dev", "--detailed"]).expect("Valid command parsing");
    if let Some(Commands::Device(device_args)) = cli.command {
        assert!(device_args.detailed);
    } else {
        panic!("Expected Device command");
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["vramguard", "monitor", "--force-cpu", "-v"])
        .expect("Valid command parsing");
    assert!(cli.force_cpu);
    assert_eq!(cli.verbose, 1);
}

#[test]
fn test_parse_invalid_interval_rejected() {
    let result = Cli::try_parse_from(["vramguard", "monitor", "--interval", "fast"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_unknown_command_rejected() {
    let result = Cli::try_parse_from(["vramguard", "frobnicate"]);
    assert!(result.is_err());
}
