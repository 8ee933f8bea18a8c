//! Hook configuration.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults (`clang-tidy` on `PATH`, one worker per CPU)
//! 2. The nearest `.tidyhook.toml` in the current directory or its ancestors
//! 3. `TIDYHOOK_COMMAND` / `TIDYHOOK_JOBS` environment variables
//!
//! ```toml
//! # .tidyhook.toml
//! command = "clang-tidy-17"
//! jobs = 4
//! extra_args = ["-p", "build"]
//! ```

mod loader;
mod parallel;

pub use loader::{
    apply_env_overrides, directory_ancestors, load_config, load_config_from, parse_config,
    CONFIG_FILE_NAME, ENV_COMMAND, ENV_JOBS,
};
pub use parallel::ParallelConfig;

use serde::Deserialize;

/// Default analyzer program.
pub const DEFAULT_COMMAND: &str = "clang-tidy";

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

/// Settings for one hook run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Analyzer program name or path
    #[serde(default = "default_command")]
    pub command: String,

    /// Worker count; absent or 0 uses every CPU
    pub jobs: Option<usize>,

    /// Flags placed before the command-line flags on every run
    pub extra_args: Vec<String>,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            jobs: None,
            extra_args: Vec::new(),
        }
    }
}

impl HookConfig {
    pub fn parallel(&self) -> ParallelConfig {
        ParallelConfig {
            max_concurrency: self.jobs,
        }
    }
}
