//! Splitting the hook's raw arguments into target files and forwarded flags.

use crate::errors::{HookError, Result};
use std::path::{Path, PathBuf};

/// Flags that make clang-tidy apply fixes in place. LLVM's option parser
/// accepts single- and double-dash spellings alike.
pub const FIX_FLAGS: [&str; 4] = ["-fix", "--fix", "-fix-errors", "--fix-errors"];

const VERSION_FLAG: &str = "--version";

/// A parsed hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    files: Vec<PathBuf>,
    flags: Vec<String>,
    edit_in_place: bool,
    pinned_version: Option<String>,
}

impl Invocation {
    /// Parse `args`, treating every non-flag argument that names an existing
    /// regular file as a target.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::parse_with(args, |path| path.is_file())
    }

    /// Parse `args` with a caller-supplied test for "is a target file".
    ///
    /// Arguments keep their relative order within the flag list. A
    /// `--version` pin is consumed and never forwarded.
    pub fn parse_with<I, S, F>(args: I, is_file: F) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Path) -> bool,
    {
        let mut files = Vec::new();
        let mut flags = Vec::new();
        let mut pinned_version = None;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            if arg == VERSION_FLAG {
                let value = args
                    .next()
                    .ok_or_else(|| HookError::usage("--version requires a value"))?;
                pinned_version = Some(normalize_version(&value));
            } else if let Some(rest) = arg.strip_prefix(VERSION_FLAG) {
                pinned_version = Some(normalize_version(rest));
            } else if !arg.starts_with('-') && is_file(Path::new(&arg)) {
                files.push(PathBuf::from(arg));
            } else {
                flags.push(arg);
            }
        }

        if files.is_empty() {
            return Err(HookError::usage("no files to check were given"));
        }
        if pinned_version.as_deref() == Some("") {
            return Err(HookError::usage("--version requires a value"));
        }

        let edit_in_place = has_fix_flag(&flags);

        Ok(Self {
            files,
            flags,
            edit_in_place,
            pinned_version,
        })
    }

    /// Prepend configured flags ahead of the ones given on the command line.
    pub fn with_leading_flags(mut self, leading: &[String]) -> Self {
        if !leading.is_empty() {
            let mut flags = leading.to_vec();
            flags.append(&mut self.flags);
            self.edit_in_place = has_fix_flag(&flags);
            self.flags = flags;
        }
        self
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Whether clang-tidy was asked to rewrite sources.
    pub fn edit_in_place(&self) -> bool {
        self.edit_in_place
    }

    pub fn pinned_version(&self) -> Option<&str> {
        self.pinned_version.as_deref()
    }
}

fn has_fix_flag(flags: &[String]) -> bool {
    flags.iter().any(|flag| FIX_FLAGS.contains(&flag.as_str()))
}

// `--version=15.0`, `--version 15.0` and `--version15.0` all mean "15.0".
fn normalize_version(raw: &str) -> String {
    raw.chars().filter(|c| *c != '=' && !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Invocation> {
        Invocation::parse_with(args.iter().copied(), |p| {
            p.extension().is_some_and(|ext| ext == "cpp" || ext == "h")
        })
    }

    #[test]
    fn test_splits_files_from_flags() {
        let inv = parse(&["-checks=*", "a.cpp", "-p", "build", "b.h"]).unwrap();
        assert_eq!(inv.files(), &[PathBuf::from("a.cpp"), PathBuf::from("b.h")]);
        assert_eq!(inv.flags(), &["-checks=*", "-p", "build"]);
        assert!(!inv.edit_in_place());
        assert_eq!(inv.pinned_version(), None);
    }

    #[test]
    fn test_no_files_is_usage_error() {
        let err = parse(&["-checks=*", "-p", "build"]).unwrap_err();
        assert!(matches!(err, HookError::Usage(_)));
    }

    #[test]
    fn test_empty_args_is_usage_error() {
        assert!(matches!(parse(&[]).unwrap_err(), HookError::Usage(_)));
    }

    #[test]
    fn test_fix_flags_enable_edit_in_place() {
        for flag in FIX_FLAGS {
            let inv = parse(&[flag, "a.cpp"]).unwrap();
            assert!(inv.edit_in_place(), "{flag} should enable fix mode");
            assert_eq!(inv.flags(), &[flag]);
        }
    }

    #[test]
    fn test_fix_prefixed_flag_is_not_fix_mode() {
        let inv = parse(&["-fix-notes", "a.cpp"]).unwrap();
        assert!(!inv.edit_in_place());
    }

    #[test]
    fn test_flag_shaped_filename_is_forwarded() {
        let inv = parse(&["-x.cpp", "a.cpp"]).unwrap();
        assert_eq!(inv.files(), &[PathBuf::from("a.cpp")]);
        assert_eq!(inv.flags(), &["-x.cpp"]);
    }

    #[test]
    fn test_version_pin_forms() {
        for args in [
            vec!["--version=15.0", "a.cpp"],
            vec!["--version", "15.0", "a.cpp"],
            vec!["--version 15.0", "a.cpp"],
        ] {
            let inv = parse(&args).unwrap();
            assert_eq!(inv.pinned_version(), Some("15.0"));
            assert!(inv.flags().is_empty());
        }
    }

    #[test]
    fn test_dangling_version_is_usage_error() {
        assert!(matches!(
            parse(&["a.cpp", "--version"]).unwrap_err(),
            HookError::Usage(_)
        ));
        assert!(matches!(
            parse(&["a.cpp", "--version="]).unwrap_err(),
            HookError::Usage(_)
        ));
    }

    #[test]
    fn test_leading_flags_come_first() {
        let inv = parse(&["-quiet", "a.cpp"])
            .unwrap()
            .with_leading_flags(&["-p".to_string(), "build".to_string()]);
        assert_eq!(inv.flags(), &["-p", "build", "-quiet"]);
    }

    #[test]
    fn test_leading_fix_flag_enables_edit_in_place() {
        let inv = parse(&["a.cpp"])
            .unwrap()
            .with_leading_flags(&["--fix-errors".to_string()]);
        assert!(inv.edit_in_place());
    }

    #[test]
    fn test_parse_uses_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.cpp");
        std::fs::write(&file, "int main() {}\n").unwrap();
        let file_arg = file.to_string_lossy().into_owned();
        let dir_arg = dir.path().to_string_lossy().into_owned();

        let inv = Invocation::parse(["-p".to_string(), dir_arg.clone(), file_arg]).unwrap();
        assert_eq!(inv.files(), &[file]);
        assert_eq!(inv.flags(), &["-p".to_string(), dir_arg]);
    }
}
