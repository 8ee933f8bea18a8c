//! Running clang-tidy over every target file and folding the results.
//!
//! # Lifecycle
//!
//! ```text
//! configure (args, tool lookup, version pin) -> run (parallel, one-shot) -> AggregateResult
//! ```
//!
//! Wrapper failures (bad arguments, missing tool, version mismatch) are
//! raised by [`configure`] before any file is touched. Once running, a file
//! that clang-tidy rejects is an ordinary result, folded into the aggregate
//! by taking the maximum exit code.

use crate::cleanup::strip_warning_banners;
use crate::config::{HookConfig, ParallelConfig};
use crate::errors::{HookError, Result};
use crate::invocation::Invocation;
use crate::io::{ProcessRunner, ToolOutput};
use crate::observability::{
    increment_processed, set_current_file, set_phase, set_progress, HookPhase,
};
use crate::version::assert_version;
use rayon::prelude::*;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Exit code forced on a file when fix mode leaves diagnostics behind.
pub const FIX_RESIDUAL_EXIT_CODE: i32 = 1;

/// Outcome of one clang-tidy run on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerFileResult {
    pub file: PathBuf,
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    /// stderr with warning-count banners removed
    pub stderr: Vec<u8>,
    /// Set when fix mode left diagnostics and the exit code was overridden
    pub forced_failure: bool,
}

impl PerFileResult {
    /// Clean the captured output and apply the fix-mode override.
    ///
    /// In fix mode clang-tidy exits 0 after rewriting what it could; any
    /// stderr left after banner removal is a diagnostic it could not fix,
    /// so the file fails with [`FIX_RESIDUAL_EXIT_CODE`].
    pub fn from_output(file: impl Into<PathBuf>, output: ToolOutput, edit_in_place: bool) -> Self {
        let file = file.into();
        let stderr = strip_warning_banners(&output.stderr).into_owned();

        let forced_failure = edit_in_place && !stderr.is_empty();
        let exit_code = if forced_failure {
            tracing::info!(file = %file.display(), "diagnostics remain after fix");
            FIX_RESIDUAL_EXIT_CODE
        } else {
            output.exit_code
        };

        Self {
            file,
            exit_code,
            stdout: output.stdout,
            stderr,
            forced_failure,
        }
    }
}

/// Merged outcome of a whole hook run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    /// Maximum of all per-file exit codes
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Number of files that were analyzed
    pub files: usize,
}

impl AggregateResult {
    /// Reduce per-file results. Empty streams are skipped when joining so
    /// clean files add no blank lines.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = PerFileResult>,
    {
        results
            .into_iter()
            .fold(Self::default(), |mut acc, result| {
                acc.exit_code = if acc.files == 0 {
                    result.exit_code
                } else {
                    acc.exit_code.max(result.exit_code)
                };
                join_stream(&mut acc.stdout, &result.stdout);
                join_stream(&mut acc.stderr, &result.stderr);
                acc.files += 1;
                acc
            })
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Write the merged output when the run failed; a passing run is silent.
    pub fn surface<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> std::io::Result<()> {
        if self.success() {
            return Ok(());
        }
        out.write_all(&self.stdout)?;
        out.flush()?;
        err.write_all(&self.stderr)?;
        err.flush()
    }
}

fn join_stream(acc: &mut Vec<u8>, part: &[u8]) {
    if part.is_empty() {
        return;
    }
    if !acc.is_empty() {
        acc.push(b'\n');
    }
    acc.extend_from_slice(part);
}

/// Resolve the analyzer program on `PATH` (or as a path).
pub fn locate_tool(command: &str) -> Result<PathBuf> {
    which::which(command).map_err(|source| HookError::ToolNotFound {
        command: command.to_owned(),
        source,
    })
}

/// Build a ready-to-run [`AnalyzerRunner`] from raw arguments.
///
/// Checks happen in order: arguments, tool presence, pinned version. No
/// target file is analyzed before all of them pass.
pub fn configure<I, S, R>(args: I, config: &HookConfig, runner: R) -> Result<AnalyzerRunner<R>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    R: ProcessRunner,
{
    let invocation = {
        let _phase = set_phase(HookPhase::Configuring);
        Invocation::parse(args)?.with_leading_flags(&config.extra_args)
    };

    let _phase = set_phase(HookPhase::VersionCheck);
    let program = locate_tool(&config.command)?;
    tracing::debug!(program = %program.display(), "located analyzer");

    if let Some(expected) = invocation.pinned_version() {
        assert_version(&runner, &program, &config.command, expected)?;
    }

    Ok(AnalyzerRunner::new(
        invocation,
        program,
        runner,
        config.parallel(),
    ))
}

/// Runs the analyzer once per target file on a bounded worker pool.
#[derive(Debug)]
pub struct AnalyzerRunner<R> {
    invocation: Invocation,
    program: PathBuf,
    runner: R,
    parallel: ParallelConfig,
}

impl<R: ProcessRunner> AnalyzerRunner<R> {
    /// Create a runner for an already-located `program`.
    pub fn new(
        invocation: Invocation,
        program: PathBuf,
        runner: R,
        parallel: ParallelConfig,
    ) -> Self {
        Self {
            invocation,
            program,
            runner,
            parallel,
        }
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Analyze a single file: `<program> <file> <flags...>`.
    pub fn run_one(&self, file: &Path) -> Result<PerFileResult> {
        let _phase = set_phase(HookPhase::Running);
        let _file = set_current_file(file);
        let span = tracing::debug_span!("run_one", file = %file.display());
        let _enter = span.enter();

        let output = self.runner.run(&self.program, &self.args_for(file))?;

        let result = PerFileResult::from_output(file, output, self.invocation.edit_in_place());
        tracing::debug!(exit_code = result.exit_code, "file done");
        increment_processed();
        Ok(result)
    }

    /// Analyze every target file and merge the results. Consumes the runner:
    /// a run is one-shot.
    pub fn run(self) -> Result<AggregateResult> {
        let files = self.invocation.files();
        let workers = self.parallel.workers_for(files.len());
        tracing::debug!(files = files.len(), workers, "starting analyzer runs");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tidyhook-worker-{i}"))
            .build()?;

        set_progress(0, files.len());
        let results = pool.install(|| {
            files
                .par_iter()
                .map(|file| self.run_one(file))
                .collect::<Result<Vec<_>>>()
        })?;

        let aggregate = AggregateResult::from_results(results);
        tracing::debug!(
            exit_code = aggregate.exit_code,
            files = aggregate.files,
            "analyzer runs finished"
        );
        Ok(aggregate)
    }

    fn args_for(&self, file: &Path) -> Vec<OsString> {
        std::iter::once(file.as_os_str().to_owned())
            .chain(self.invocation.flags().iter().map(OsString::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(exit_code: i32, stdout: &str, stderr: &str) -> PerFileResult {
        PerFileResult::from_output("f.cpp", ToolOutput::new(exit_code, stdout, stderr), false)
    }

    #[test]
    fn test_from_output_strips_banner() {
        let r = result(1, "", "3 warnings generated.\nfoo.cpp:1:1: error: bad thing");
        assert_eq!(r.stderr, b"foo.cpp:1:1: error: bad thing");
        assert_eq!(r.exit_code, 1);
        assert!(!r.forced_failure);
    }

    #[test]
    fn test_fix_mode_residual_forces_failure() {
        let r = PerFileResult::from_output(
            "f.cpp",
            ToolOutput::new(0, "", "1 warning treated\nremaining issue"),
            true,
        );
        assert_eq!(r.stderr, b"remaining issue");
        assert_eq!(r.exit_code, FIX_RESIDUAL_EXIT_CODE);
        assert!(r.forced_failure);
    }

    #[test]
    fn test_fix_mode_banner_only_passes() {
        let r = PerFileResult::from_output(
            "f.cpp",
            ToolOutput::new(0, "", "2 warnings generated.\n"),
            true,
        );
        assert!(r.stderr.is_empty());
        assert_eq!(r.exit_code, 0);
    }

    #[test]
    fn test_fix_mode_override_replaces_higher_code() {
        let r = PerFileResult::from_output("f.cpp", ToolOutput::new(2, "", "bad\n"), true);
        assert_eq!(r.exit_code, FIX_RESIDUAL_EXIT_CODE);
    }

    #[test]
    fn test_no_fix_mode_keeps_tool_code() {
        let r = result(0, "", "note: something\n");
        assert_eq!(r.exit_code, 0);
    }

    #[test]
    fn test_aggregate_takes_max_exit_code() {
        let agg = AggregateResult::from_results(vec![
            result(0, "", ""),
            result(2, "", "x"),
            result(1, "", "y"),
        ]);
        assert_eq!(agg.exit_code, 2);
        assert_eq!(agg.files, 3);
    }

    #[test]
    fn test_aggregate_negative_codes() {
        let agg = AggregateResult::from_results(vec![result(-1, "", ""), result(-3, "", "")]);
        assert_eq!(agg.exit_code, -1);
    }

    #[test]
    fn test_aggregate_joins_non_empty_streams() {
        let agg = AggregateResult::from_results(vec![
            result(1, "a", "e1"),
            result(0, "", ""),
            result(1, "b", "e2"),
        ]);
        assert_eq!(agg.stdout, b"a\nb");
        assert_eq!(agg.stderr, b"e1\ne2");
    }

    #[test]
    fn test_aggregate_all_clean_is_empty() {
        let agg = AggregateResult::from_results(vec![result(0, "", ""), result(0, "", "")]);
        assert!(agg.success());
        assert!(agg.stdout.is_empty());
        assert!(agg.stderr.is_empty());
    }

    #[test]
    fn test_surface_silent_on_success() {
        let agg = AggregateResult {
            stdout: b"ignored".to_vec(),
            ..AggregateResult::default()
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());
        agg.surface(&mut out, &mut err).unwrap();
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_surface_writes_on_failure() {
        let agg = AggregateResult {
            exit_code: 1,
            stdout: b"out".to_vec(),
            stderr: b"err".to_vec(),
            files: 1,
        };
        let (mut out, mut err) = (Vec::new(), Vec::new());
        agg.surface(&mut out, &mut err).unwrap();
        assert_eq!(out, b"out");
        assert_eq!(err, b"err");
    }

    #[test]
    fn test_locate_missing_tool() {
        let err = locate_tool("tidyhook-no-such-analyzer-0xdead").unwrap_err();
        assert!(matches!(err, HookError::ToolNotFound { .. }));
    }
}
