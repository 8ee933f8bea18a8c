//! I/O trait definitions for running the external analyzer.
//!
//! The runner abstraction is deliberately narrow: an argument list goes in,
//! an exit code and the two captured streams come out. Everything the hook
//! decides about the result happens outside of it.

use crate::errors::Result;
use std::ffi::OsString;
use std::path::Path;

/// Captured result of one analyzer process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Process exit code
    pub exit_code: i32,
    /// Everything written to stdout
    pub stdout: Vec<u8>,
    /// Everything written to stderr
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn new(exit_code: i32, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Process execution trait.
///
/// # Implementation Notes
///
/// Implementations must be `Send + Sync`: one runner is shared by every
/// worker thread of the pool. A call blocks until the process has exited
/// and both streams are fully drained.
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` and capture its output.
    ///
    /// # Errors
    ///
    /// Returns `HookError::Spawn` if the process could not be started or
    /// waited on. A non-zero exit is not an error.
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolOutput>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolOutput> {
        (**self).run(program, args)
    }
}
