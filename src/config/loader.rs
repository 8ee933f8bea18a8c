use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::HookConfig;

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = ".tidyhook.toml";

/// Overrides the analyzer program.
pub const ENV_COMMAND: &str = "TIDYHOOK_COMMAND";

/// Overrides the worker count.
pub const ENV_JOBS: &str = "TIDYHOOK_JOBS";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<HookConfig, String> {
    let config = toml::from_str::<HookConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if config.command.trim().is_empty() {
        return Err(format!("{}: command must not be empty", CONFIG_FILE_NAME));
    }

    Ok(config)
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<HookConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

// Only log actual errors, not "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find and load the nearest config file above `start`, or defaults.
pub fn load_config_from(start: PathBuf) -> HookConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            HookConfig::default()
        })
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: HookConfig, lookup: F) -> HookConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(command) = lookup(ENV_COMMAND).filter(|c| !c.trim().is_empty()) {
        config.command = command;
    }

    if let Some(jobs) = lookup(ENV_JOBS) {
        match jobs.trim().parse::<usize>() {
            Ok(jobs) => config.jobs = Some(jobs),
            Err(e) => log::warn!("Ignoring {}={:?}: {}", ENV_JOBS, jobs, e),
        }
    }

    config
}

/// Load configuration for the current directory and process environment.
pub fn load_config() -> HookConfig {
    let config = match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            HookConfig::default()
        }
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}
