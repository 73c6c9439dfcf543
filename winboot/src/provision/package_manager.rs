//! Scoop bootstrap: locate or install the package manager, then the baseline
//! extraction tooling its interpreter manifests depend on.

use crate::config::Config;
use crate::exec::{self, CommandRunner};
use crate::fetch::InstallerFetcher;
use crate::pathenv::{PathOrder, ProcessEnvironment};
use anyhow::{Context, Result};
use std::io::Write;

pub const PACKAGE_MANAGER: &str = "scoop";

/// (package, fatal). innounp is best-effort: only InnoSetup-based manifests
/// need it, and its own install is flaky on some hosts.
const BASELINE_PACKAGES: &[(&str, bool)] = &[("7zip", true), ("innounp", false), ("dark", true)];

/// Make sure the package manager is resolvable, installing it if needed.
pub fn ensure(
    config: &Config,
    runner: &dyn CommandRunner,
    fetcher: &dyn InstallerFetcher,
    env: &mut ProcessEnvironment,
    elevated: bool,
) -> Result<()> {
    if let Some(path) = env.lookup(PACKAGE_MANAGER) {
        tracing::info!(path = %path.display(), "scoop already installed");
        return Ok(());
    }
    tracing::info!("scoop not found, installing");
    install(config, runner, fetcher, env, elevated)
}

fn install(
    config: &Config,
    runner: &dyn CommandRunner,
    fetcher: &dyn InstallerFetcher,
    env: &mut ProcessEnvironment,
    elevated: bool,
) -> Result<()> {
    run_installer(config, runner, fetcher, env, elevated)?;
    env.refresh_persisted(runner, PathOrder::from_env())?;
    configure(runner, env)?;
    install_baseline(runner, env)?;
    env.refresh_persisted(runner, PathOrder::from_env())?;
    Ok(())
}

/// Download the installer to a temp file and execute it. The temp file is
/// removed on every exit path, including sub-command failure (drop).
fn run_installer(
    config: &Config,
    runner: &dyn CommandRunner,
    fetcher: &dyn InstallerFetcher,
    env: &ProcessEnvironment,
    elevated: bool,
) -> Result<()> {
    let script = fetcher.fetch(&config.installer_url)?;
    let mut file = tempfile::Builder::new()
        .prefix("scoop-install-")
        .suffix(".ps1")
        .tempfile()
        .context("Create installer temp file")?;
    file.write_all(script.as_bytes())
        .context("Write installer script")?;

    let mut parts = vec![
        "powershell".to_string(),
        "-NoProfile".to_string(),
        "-ExecutionPolicy".to_string(),
        "Bypass".to_string(),
        "-File".to_string(),
        file.path().to_string_lossy().into_owned(),
    ];
    if elevated {
        parts.push("-RunAsAdmin".to_string());
    }
    exec::run_checked(runner, &parts, env)
}

/// use_lessmsi unpacks MSI payloads without msiexec; autostash keeps
/// `scoop update` from stalling on local bucket changes.
fn configure(runner: &dyn CommandRunner, env: &ProcessEnvironment) -> Result<()> {
    for (key, value) in [("use_lessmsi", "true"), ("autostash_on_conflict", "true")] {
        let parts = command(&["scoop", "config", key, value]);
        exec::run_checked(runner, &parts, env)?;
    }
    Ok(())
}

fn install_baseline(runner: &dyn CommandRunner, env: &ProcessEnvironment) -> Result<()> {
    for &(package, fatal) in BASELINE_PACKAGES {
        let parts = command(&["scoop", "install", package]);
        match exec::run_checked(runner, &parts, env) {
            Ok(()) => {}
            Err(err) if !fatal => {
                tracing::warn!(package = %package, error = %err, "baseline install failed, continuing");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn command(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
