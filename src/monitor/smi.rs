// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! nvidia-smi diagnostic queries
//!
//! The external diagnostic binary is an optional data source: a missing
//! binary simply omits the line, and a failing invocation is reported as a
//! string rather than propagated.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

/// Fixed query arguments: comma-separated, header-free, unit-less CSV.
const QUERY_ARGS: [&str; 2] = [
    "--query-gpu=timestamp,name,memory.total,memory.used,memory.free,utilization.gpu",
    "--format=csv,noheader,nounits",
];

/// Resolve the diagnostic binary to an executable path.
///
/// Explicit paths (anything with a separator) are checked directly; bare
/// names are searched on `PATH`.
pub fn resolve(binary: &str) -> Option<PathBuf> {
    let candidate = Path::new(binary);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(binary))
        .find(|path| path.is_file())
}

/// Query the diagnostic binary for a one-line utilization summary.
///
/// Returns `None` when the binary is absent or produced no output, and a
/// failure description when the invocation itself failed.
pub fn query(binary: &str) -> Option<String> {
    let path = resolve(binary)?;

    let output = match Command::new(&path).args(QUERY_ARGS).output() {
        Ok(output) => output,
        Err(err) => return Some(format!("nvidia-smi failed: {err}")),
    };

    if !output.status.success() {
        debug!("diagnostic binary {} exited with {}", path.display(), output.status);
        return Some(format!("nvidia-smi failed: {}", output.status));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}
