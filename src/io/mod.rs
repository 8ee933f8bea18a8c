//! Process I/O for the hook.
//!
//! [`traits::ProcessRunner`] is the only way the rest of the crate talks to
//! the analyzer binary, which lets tests swap in a scripted fake.

pub mod real;
pub mod traits;

pub use real::SystemRunner;
pub use traits::{ProcessRunner, ToolOutput};
