//! Locate or install the pinned Python interpreter.

use crate::config::Config;
use crate::exec::{self, CommandRunner};
use crate::pathenv::ProcessEnvironment;
use anyhow::Result;
use std::path::PathBuf;

/// Resolve the versioned interpreter, installing it via the package manager
/// when absent. Returns the value to invoke for the handoff: the resolved
/// path when already present, the bare versioned name after a fresh install
/// (the package manager's shim directory is on the refreshed search path).
pub fn ensure(
    config: &Config,
    runner: &dyn CommandRunner,
    env: &mut ProcessEnvironment,
) -> Result<PathBuf> {
    let name = config.interpreter_name();
    if let Some(path) = env.lookup(&name) {
        tracing::info!(interpreter = %name, path = %path.display(), "interpreter already installed");
        if let Some(dir) = path.parent() {
            // A version-agnostic `python` now resolves to this copy first.
            env.prepend(dir);
        }
        return Ok(path);
    }

    tracing::info!(interpreter = %name, "interpreter not found, installing");
    let parts = vec![
        "scoop".to_string(),
        "install".to_string(),
        config.interpreter_manifest_url(),
    ];
    exec::run_checked(runner, &parts, env)?;
    Ok(PathBuf::from(name))
}
