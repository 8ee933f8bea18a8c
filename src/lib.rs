//! tidyhook: run clang-tidy over the files of a commit, in parallel.
//!
//! - [`invocation`] splits the hook's arguments into files and forwarded flags
//! - [`runner`] runs one analyzer process per file and folds the results
//! - [`cleanup`] strips clang-tidy's warning-count banners
//! - [`version`] checks a pinned analyzer version
//! - [`io`] is the process boundary, replaceable in tests
//! - [`config`], [`cli`], [`observability`], [`errors`] are the surrounding plumbing

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod errors;
pub mod invocation;
pub mod io;
pub mod observability;
pub mod runner;
pub mod version;

pub use crate::errors::{HookError, Result};
pub use crate::invocation::Invocation;
pub use crate::io::{ProcessRunner, SystemRunner, ToolOutput};
pub use crate::runner::{configure, locate_tool, AggregateResult, AnalyzerRunner, PerFileResult};
