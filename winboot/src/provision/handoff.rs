//! Hand off to the project build script with the provisioned interpreter.

use crate::config::Config;
use crate::exec::CommandRunner;
use crate::pathenv::ProcessEnvironment;
use anyhow::Result;
use std::path::Path;

/// Invoke the build script if present, forwarding all arguments and
/// propagating its exit code. A missing script is a valid terminal state.
pub fn run(
    config: &Config,
    runner: &dyn CommandRunner,
    env: &ProcessEnvironment,
    interpreter: &Path,
    args: &[String],
) -> Result<i32> {
    let script = config.handoff_script();
    if !script.exists() {
        tracing::info!(script = %script.display(), "no build script, nothing to hand off");
        return Ok(0);
    }

    let mut parts = vec![
        interpreter.to_string_lossy().into_owned(),
        script.to_string_lossy().into_owned(),
    ];
    parts.extend(args.iter().cloned());
    tracing::info!(script = %script.display(), "handing off to build script");
    runner.status(&parts, env)
}
