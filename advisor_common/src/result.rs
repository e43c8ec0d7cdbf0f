//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `AdvisorError`, so functions can simply return `Result<T>`.
use crate::error::AdvisorError;

/// Workspace-wide `Result` alias with `AdvisorError` as the default error.
pub type Result<T, E = AdvisorError> = std::result::Result<T, E>;
