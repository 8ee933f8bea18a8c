//! Thread-local context tracking for crash reports.
//!
//! Each thread records which hook phase it is in and which target file it
//! is running the analyzer on. Worker threads set their own context, so a
//! panic inside the pool still names the file. Progress is global.

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static FILES_PROCESSED: AtomicUsize = AtomicUsize::new(0);
static FILES_TOTAL: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CURRENT_CONTEXT: RefCell<HookContext> = const { RefCell::new(HookContext::new()) };
}

/// Context snapshot for the current thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookContext {
    /// Current hook phase
    pub phase: Option<HookPhase>,
    /// Target file whose analyzer run is in progress
    pub current_file: Option<PathBuf>,
}

impl HookContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_file: None,
        }
    }
}

/// Stages of a hook run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    /// Loading config and splitting arguments
    Configuring,
    /// Locating the analyzer and checking a pinned version
    VersionCheck,
    /// Running the analyzer over target files
    Running,
    /// Writing the aggregate result
    Reporting,
}

impl std::fmt::Display for HookPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuring => write!(f, "configuring"),
            Self::VersionCheck => write!(f, "version_check"),
            Self::Running => write!(f, "running"),
            Self::Reporting => write!(f, "reporting"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: HookContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current phase; the previous one comes back when the guard drops.
#[must_use]
pub fn set_phase(phase: HookPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Set the current phase without a guard.
pub fn set_phase_persistent(phase: HookPhase) {
    CURRENT_CONTEXT.with(|ctx| {
        ctx.borrow_mut().phase = Some(phase);
    });
}

/// Set the file being analyzed on this thread.
#[must_use]
pub fn set_current_file(path: impl Into<PathBuf>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_file = Some(path.into());
        ContextGuard { previous }
    })
}

/// Set the progress counters (processed and total files).
pub fn set_progress(processed: usize, total: usize) {
    FILES_PROCESSED.store(processed, Ordering::Relaxed);
    FILES_TOTAL.store(total, Ordering::Relaxed);
}

/// Increment the processed file count. Safe to call from worker threads.
pub fn increment_processed() {
    FILES_PROCESSED.fetch_add(1, Ordering::Relaxed);
}

#[must_use]
pub fn get_current_context() -> HookContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Get the current progress (processed, total).
#[must_use]
pub fn get_progress() -> (usize, usize) {
    (
        FILES_PROCESSED.load(Ordering::Relaxed),
        FILES_TOTAL.load(Ordering::Relaxed),
    )
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = HookContext::new();
    });
}
