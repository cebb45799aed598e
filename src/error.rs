// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for vramguard
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for vramguard operations
#[derive(Error, Debug)]
pub enum GuardError {
    /// Accelerator runtime errors
    #[error("Accelerator error: {0}")]
    Accelerator(#[from] RuntimeError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised at the accelerator runtime boundary.
///
/// `Unavailable` means the underlying library itself could not be loaded or
/// initialized; `Query` means a specific call into an otherwise-available
/// runtime failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The accelerator runtime could not be loaded
    #[error("accelerator runtime unavailable: {0}")]
    Unavailable(String),

    /// A query into an available runtime failed
    #[error("accelerator query failed: {0}")]
    Query(String),
}

/// Result type alias for vramguard operations
pub type Result<T> = std::result::Result<T, GuardError>;
