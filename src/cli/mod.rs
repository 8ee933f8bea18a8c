//! CLI module for tidyhook
//!
//! - Argument capture (`args`)
//! - The top-level hook run wired to the real process runner

pub mod args;

pub use args::{parse_args, Cli};

use crate::config::{self, HookConfig};
use crate::io::SystemRunner;
use crate::observability::{set_phase_persistent, HookPhase};
use crate::runner::configure;
use anyhow::{Context, Result};

/// Run the hook for `cli` and return the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    set_phase_persistent(HookPhase::Configuring);
    let config = config::load_config();
    run_with_config(cli, &config)
}

/// Run the hook with an explicit configuration.
pub fn run_with_config(cli: Cli, config: &HookConfig) -> Result<i32> {
    let runner = configure(cli.args, config, SystemRunner::new())?;

    set_phase_persistent(HookPhase::Running);
    let aggregate = runner.run()?;

    set_phase_persistent(HookPhase::Reporting);
    aggregate
        .surface(&mut std::io::stdout().lock(), &mut std::io::stderr().lock())
        .context("failed to write analyzer output")?;

    Ok(aggregate.exit_code)
}
