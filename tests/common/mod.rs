// Test utilities for tidyhook integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use tidyhook::config::HookConfig;
use tidyhook::{ProcessRunner, Result, ToolOutput};

/// Scripted stand-in for clang-tidy.
///
/// Outputs are keyed by the file name of the target (the first argument);
/// unknown files get `default`. Every call is recorded.
#[derive(Debug, Default)]
pub struct FakeRunner {
    responses: HashMap<String, ToolOutput>,
    default: ToolOutput,
    version_output: Option<String>,
    calls: Mutex<Vec<Vec<OsString>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, file_name: &str, output: ToolOutput) -> Self {
        self.responses.insert(file_name.to_string(), output);
        self
    }

    pub fn with_version_output(mut self, text: &str) -> Self {
        self.version_output = Some(text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Vec<OsString>> {
        self.calls.lock().unwrap().clone()
    }

    /// File names analyzed, sorted (completion order is unspecified).
    pub fn analyzed_files(&self) -> Vec<String> {
        let mut files: Vec<String> = self
            .calls()
            .iter()
            .filter(|args| args.first().is_some_and(|a| a != "--version"))
            .map(|args| file_name(Path::new(&args[0])))
            .collect();
        files.sort();
        files
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, _program: &Path, args: &[OsString]) -> Result<ToolOutput> {
        self.calls.lock().unwrap().push(args.to_vec());

        if args.first().is_some_and(|a| a == "--version") {
            let text = self.version_output.clone().unwrap_or_default();
            return Ok(ToolOutput::new(0, text, ""));
        }

        let key = args.first().map(|a| file_name(Path::new(a))).unwrap_or_default();
        Ok(self
            .responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A temp directory holding empty source files.
pub struct SourceTree {
    pub dir: TempDir,
}

impl SourceTree {
    pub fn with_files(names: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "int main() { return 0; }\n").unwrap();
        }
        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn arg(&self, name: &str) -> String {
        self.path(name).to_string_lossy().into_owned()
    }
}

/// Config whose command resolves to an executable that always exists
/// (this test binary); the fake runner never actually executes it.
pub fn resolvable_config() -> HookConfig {
    let exe = std::env::current_exe().unwrap();
    HookConfig {
        command: exe.to_string_lossy().into_owned(),
        jobs: Some(4),
        extra_args: Vec::new(),
    }
}
