//! Parallelism configuration for per-file analyzer runs.
//!
//! Every target file gets its own clang-tidy process; this module decides
//! how many of them run at once.

/// Configuration for the worker pool.
///
/// # Example
///
/// ```rust
/// use tidyhook::config::ParallelConfig;
///
/// let config = ParallelConfig::with_jobs(4);
/// assert_eq!(config.effective_concurrency(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Maximum concurrent analyzer processes (default: num_cpus)
    ///
    /// `None` and `Some(0)` both mean one worker per available CPU.
    pub max_concurrency: Option<usize>,
}

impl ParallelConfig {
    /// Create a new parallel config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with a fixed worker count.
    pub fn with_jobs(jobs: usize) -> Self {
        Self {
            max_concurrency: Some(jobs),
        }
    }

    /// Create a config that runs one file at a time.
    pub fn sequential() -> Self {
        Self::with_jobs(1)
    }

    /// Get the effective concurrency level.
    ///
    /// Returns the configured max_concurrency, or the number of
    /// available CPU cores if not specified.
    pub fn effective_concurrency(&self) -> usize {
        match self.max_concurrency {
            Some(jobs) if jobs > 0 => jobs,
            _ => num_cpus::get().max(1),
        }
    }

    /// Worker count actually needed for `tasks` files.
    pub fn workers_for(&self, tasks: usize) -> usize {
        self.effective_concurrency().min(tasks).max(1)
    }
}
