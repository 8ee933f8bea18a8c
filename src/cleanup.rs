//! Scrubbing of clang-tidy's warning-count banners.
//!
//! clang-tidy prints count lines such as `3 warnings generated.` on stderr
//! for every translation unit. They carry no diagnostic of their own, so they
//! are removed before deciding whether anything is left to report.

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::borrow::Cow;

/// `<digits/commas> warning[s] <token><whitespace>`, matched byte-wise so
/// non-UTF-8 output from the analyzer is handled.
static WARNING_BANNER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)[\d,]+ warnings? \S+\s+").expect("warning banner pattern is valid")
});

/// Remove every warning-count banner from `stderr`.
///
/// Bytes outside a banner match are preserved exactly; the result borrows
/// the input when nothing matched.
pub fn strip_warning_banners(stderr: &[u8]) -> Cow<'_, [u8]> {
    WARNING_BANNER.replace_all(stderr, &b""[..])
}
