//! Observability: logging setup, crash reports, and context tracking.
//!
//! ```ignore
//! use tidyhook::observability::{init_logging, install_panic_hook};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_logging();
//!     // ... rest of application
//! }
//! ```

pub mod context;
pub mod logging;
pub mod panic_hook;

pub use context::{
    get_current_context, get_progress, increment_processed, set_current_file, set_phase,
    set_phase_persistent, set_progress, ContextGuard, HookContext, HookPhase,
};
pub use logging::{init_logging, LOG_ENV};
pub use panic_hook::install_panic_hook;
