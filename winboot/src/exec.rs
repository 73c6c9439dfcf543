//! Shelling out to external tools.
//!
//! Every external invocation goes through the `CommandRunner` capability so
//! tests can substitute a recording fake. The search path is passed
//! explicitly with each call; the provisioner never mutates the ambient
//! process environment.

use crate::pathenv::ProcessEnvironment;
use anyhow::{Context, Result};
use std::process::Command;
use thiserror::Error;

/// Captured result of an invoked external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

#[derive(Debug, Error)]
pub enum ExecError {
    /// Non-zero exit of a command whose failure is fatal.
    #[error("command `{command}` failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },
}

/// Capability for invoking external commands.
///
/// `output` captures stdout/stderr (used for host queries); `status` inherits
/// the parent's stdio so installer and build-script output reaches the user.
pub trait CommandRunner {
    /// Run a command with captured output.
    fn output(&self, parts: &[String], env: &ProcessEnvironment) -> Result<CommandResult>;

    /// Run a command with inherited stdio; returns the exit code.
    fn status(&self, parts: &[String], env: &ProcessEnvironment) -> Result<i32>;
}

/// Render a command line for logs and error messages.
pub fn command_line(parts: &[String]) -> String {
    parts.join(" ")
}

/// Run with inherited stdio and fail on non-zero exit.
pub fn run_checked(
    runner: &dyn CommandRunner,
    parts: &[String],
    env: &ProcessEnvironment,
) -> Result<()> {
    let code = runner.status(parts, env)?;
    if code != 0 {
        return Err(ExecError::CommandFailed {
            command: command_line(parts),
            code,
        }
        .into());
    }
    Ok(())
}

/// Production runner backed by `std::process::Command`.
pub struct SystemRunner;

impl SystemRunner {
    fn command(&self, parts: &[String], env: &ProcessEnvironment) -> Command {
        let mut cmd = Command::new(&parts[0]);
        cmd.args(&parts[1..]);
        cmd.env("PATH", env.search_path());
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn output(&self, parts: &[String], env: &ProcessEnvironment) -> Result<CommandResult> {
        tracing::debug!(command = %command_line(parts), "invoking (captured)");
        let out = self
            .command(parts, env)
            .output()
            .with_context(|| format!("Failed to spawn `{}`", command_line(parts)))?;
        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            exit_code: out.status.code().unwrap_or(-1),
        })
    }

    fn status(&self, parts: &[String], env: &ProcessEnvironment) -> Result<i32> {
        tracing::debug!(command = %command_line(parts), "invoking");
        let status = self
            .command(parts, env)
            .status()
            .with_context(|| format!("Failed to spawn `{}`", command_line(parts)))?;
        Ok(status.code().unwrap_or(-1))
    }
}
