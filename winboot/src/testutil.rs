//! Test doubles for the injected capabilities.

use crate::exec::{command_line, CommandResult, CommandRunner};
use crate::fetch::InstallerFetcher;
use crate::pathenv::ProcessEnvironment;
use anyhow::Result;
use std::cell::RefCell;

/// Recording runner. Rules match on a substring of the rendered command line;
/// the first match wins, unmatched commands succeed with exit code 0.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<Vec<String>>>,
    output_rules: Vec<(String, String)>,
    status_rules: Vec<(String, i32)>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured stdout (exit 0) for commands containing `needle`.
    pub fn with_stdout(mut self, needle: &str, stdout: &str) -> Self {
        self.output_rules.push((needle.to_string(), stdout.to_string()));
        self
    }

    /// Exit code for commands containing `needle`.
    pub fn with_status(mut self, needle: &str, code: i32) -> Self {
        self.status_rules.push((needle.to_string(), code));
        self
    }

    /// Every recorded invocation, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Recorded invocations as rendered command lines.
    pub fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|p| command_line(p)).collect()
    }

    fn record(&self, parts: &[String]) -> String {
        self.calls.borrow_mut().push(parts.to_vec());
        command_line(parts)
    }

    fn code_for(&self, line: &str) -> i32 {
        self.status_rules
            .iter()
            .find(|(needle, _)| line.contains(needle))
            .map(|(_, code)| *code)
            .unwrap_or(0)
    }
}

impl CommandRunner for FakeRunner {
    fn output(&self, parts: &[String], _env: &ProcessEnvironment) -> Result<CommandResult> {
        let line = self.record(parts);
        for (needle, stdout) in &self.output_rules {
            if line.contains(needle) {
                return Ok(CommandResult {
                    stdout: stdout.clone(),
                    stderr: String::new(),
                    exit_code: 0,
                });
            }
        }
        Ok(CommandResult {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: self.code_for(&line),
        })
    }

    fn status(&self, parts: &[String], _env: &ProcessEnvironment) -> Result<i32> {
        let line = self.record(parts);
        Ok(self.code_for(&line))
    }
}

/// Recording fetcher returning a canned installer body.
pub struct FakeFetcher {
    pub body: String,
    fetched: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            fetched: RefCell::new(Vec::new()),
        }
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl InstallerFetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.fetched.borrow_mut().push(url.to_string());
        Ok(self.body.clone())
    }
}

/// Drop an executable stub into `dir` so `which` can resolve it.
#[cfg(unix)]
pub fn fake_exe(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
