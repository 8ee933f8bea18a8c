//! Production implementation of [`ProcessRunner`].

use crate::errors::{HookError, Result};
use crate::io::traits::{ProcessRunner, ToolOutput};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Exit code recorded for a process that ended without one (killed by a
/// signal).
pub const ABNORMAL_EXIT_CODE: i32 = 1;

/// Runs the analyzer as a real child process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolOutput> {
        tracing::debug!(program = %program.display(), ?args, "spawning analyzer");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| HookError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let exit_code = exit_code(program, output.status);
        tracing::debug!(
            program = %program.display(),
            exit_code,
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "analyzer exited"
        );

        Ok(ToolOutput {
            exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

fn exit_code(program: &Path, status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            tracing::warn!(program = %program.display(), signal, "analyzer killed by signal");
            return ABNORMAL_EXIT_CODE;
        }
    }

    tracing::warn!(program = %program.display(), "analyzer exited without a status code");
    ABNORMAL_EXIT_CODE
}
