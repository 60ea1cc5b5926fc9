//! External analysis tools
//!
//! Evaluations rely on the `symflower` binary to execute generated code and
//! measure coverage. This module decides whether the installed binary is
//! usable and where a suitable release can be fetched; downloading and
//! running it is left to the caller.

pub mod symflower;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while checking an external tool
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Cannot find version in output: {0}")]
    VersionNotFound(String),

    #[error("Invalid version '{0}'")]
    InvalidVersion(String),

    #[error(
        "Found \"{binary}\" binary at {} with version {installed} but need at least {required}",
        .path.display()
    )]
    UserManagedOutdated {
        binary: &'static str,
        path: PathBuf,
        installed: u64,
        required: u64,
    },

    #[error("Unknown architecture {0}")]
    UnknownArchitecture(String),

    #[error("Failed to run {binary}: {message}")]
    CommandFailed { binary: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ToolResult<T> = Result<T, ToolError>;
