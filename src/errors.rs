//! Error types for the hook wrapper.
//!
//! Only failures of the wrapper itself are errors. A clang-tidy run that
//! reports diagnostics is a normal outcome and travels through
//! [`crate::runner::AggregateResult`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tidyhook operations
#[derive(Debug, Error)]
pub enum HookError {
    /// Malformed arguments (no target files, dangling `--version`)
    #[error("usage: {0}")]
    Usage(String),

    /// The analyzer binary could not be resolved to an executable
    #[error("{command} not found, but is required")]
    ToolNotFound {
        command: String,
        #[source]
        source: which::Error,
    },

    /// The installed analyzer does not match the pinned version
    #[error("expected version {expected} but found {actual}")]
    VersionMismatch { expected: String, actual: String },

    /// `--version` output carried no recognizable version marker
    #[error("unable to detect version of {command} from its --version output")]
    VersionUndetected { command: String },

    /// Spawning or waiting on the analyzer failed
    #[error("failed to run {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The worker pool could not be created
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl HookError {
    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Exit code reported to the hook framework for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, HookError>;
