//! Checking the installed analyzer against a pinned version.

use crate::errors::{HookError, Result};
use crate::io::ProcessRunner;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ffi::OsString;
use std::path::Path;

/// Marker that precedes the version number in `clang-tidy --version`.
pub const VERSION_MARKER: &str = "LLVM version ";

static VERSION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{}(\d+(?:\.\d+)*)", regex::escape(VERSION_MARKER)))
        .expect("version pattern is valid")
});

/// Extract the version following [`VERSION_MARKER`] from `--version` output.
pub fn parse_version(output: &str) -> Option<&str> {
    VERSION_LINE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `actual` satisfies the pin `expected`.
///
/// The pin is a prefix: `15` accepts `15.0.7`, `15.0` accepts `15.0.7`.
pub fn version_matches(expected: &str, actual: &str) -> bool {
    actual.starts_with(expected)
}

/// Ask `program` for its version and return it.
pub fn detect_version<R: ProcessRunner + ?Sized>(
    runner: &R,
    program: &Path,
    command: &str,
) -> Result<String> {
    let output = runner.run(program, &[OsString::from("--version")])?;
    let text = String::from_utf8_lossy(&output.stdout);

    parse_version(&text)
        .map(str::to_owned)
        .ok_or_else(|| HookError::VersionUndetected {
            command: command.to_owned(),
        })
}

/// Fail unless the installed analyzer matches `expected`.
pub fn assert_version<R: ProcessRunner + ?Sized>(
    runner: &R,
    program: &Path,
    command: &str,
    expected: &str,
) -> Result<()> {
    let actual = detect_version(runner, program, command)?;
    if version_matches(expected, &actual) {
        tracing::debug!(%actual, %expected, "analyzer version accepted");
        Ok(())
    } else {
        Err(HookError::VersionMismatch {
            expected: expected.to_owned(),
            actual,
        })
    }
}
