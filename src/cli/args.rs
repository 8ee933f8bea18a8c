use clap::Parser;
use std::ffi::OsString;

/// Command-line surface of the hook.
///
/// Everything after the program name belongs to clang-tidy or names a file
/// to check, so clap's own `--help` and `--version` are switched off:
/// `--version` pins the analyzer version instead.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tidyhook")]
#[command(about = "Run clang-tidy on each file in parallel for pre-commit", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// clang-tidy flags and files to check, in any order
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse from an explicit argument list (first item is the program name).
    pub fn parse_hook_args<I, T>(raw: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let raw: Vec<OsString> = raw.into_iter().map(Into::into).collect();
        let mut cli = Self::parse_from(&raw);
        // clap swallows a leading `--` as its own escape; clang-tidy needs it
        // to separate compiler arguments.
        if raw.get(1).is_some_and(|arg| arg == "--") {
            cli.args.insert(0, "--".to_string());
        }
        cli
    }
}

pub fn parse_args() -> Cli {
    Cli::parse_hook_args(std::env::args_os())
}
