//! Custom panic hook for structured crash reports.
//!
//! A panic inside the hook would otherwise surface in the commit output as
//! a bare Rust backtrace. The report names the phase, the file the
//! panicking thread was running clang-tidy on, and how far the run got.

use super::context::{get_current_context, get_progress, HookContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const ISSUE_URL: &str = "https://github.com/iepathos/tidyhook/issues/new";
const WIDTH: usize = 76;

/// Install the custom panic hook. Call this first thing in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", crash_report(info));
    }));
}

fn crash_report(info: &PanicHookInfo<'_>) -> String {
    let context = get_current_context();
    let (processed, total) = get_progress();

    let mut rows = vec![
        ("Version", VERSION.to_string()),
        ("Platform", std::env::consts::OS.to_string()),
        (
            "Time",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
        ("PANIC", extract_panic_message(info)),
    ];
    if let Some(location) = info.location() {
        rows.push((
            "Location",
            format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            ),
        ));
    }
    rows.extend(context_rows(&context, processed, total));
    if let Some(metadata) = Span::current().metadata() {
        rows.push(("Span", metadata.name().to_string()));
    }

    let rule = "=".repeat(WIDTH + 4);
    let mut report = format!("\n{rule}\n  TIDYHOOK CRASH REPORT\n{rule}\n");
    for (label, value) in rows {
        let line = format!("{label}: {value}");
        report.push_str(&format!("  {}\n", truncate(&line, WIDTH)));
    }
    report.push_str(&format!("{rule}\n"));

    if std::env::var_os("RUST_BACKTRACE").is_some() {
        report.push_str(&format!("{}\n", std::backtrace::Backtrace::capture()));
    } else {
        report.push_str("Run with RUST_BACKTRACE=1 for stack trace\n");
    }
    report.push_str(&format!("To report this issue: {ISSUE_URL}\n"));
    report
}

fn context_rows(
    context: &HookContext,
    processed: usize,
    total: usize,
) -> Vec<(&'static str, String)> {
    let mut rows = vec![(
        "Phase",
        context
            .phase
            .map(|p| p.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    )];

    if let Some(file) = &context.current_file {
        rows.push(("File", file.display().to_string()));
    }

    if total > 0 {
        rows.push(("Progress", format!("{processed} / {total} files")));
    }

    rows
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
