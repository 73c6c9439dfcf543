//! Explicit model of the process search path.
//!
//! The provisioner threads a `ProcessEnvironment` value through each step and
//! applies it to every spawned child instead of mutating ambient global
//! state. Children inherit the mutated copy; nothing is persisted to the
//! OS-level environment store.

use crate::config;
use crate::exec::{self, CommandRunner, ExecError};
use anyhow::Result;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Which persisted value wins when the search path is rebuilt after a
/// package-manager install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOrder {
    MachineFirst,
    UserFirst,
}

impl PathOrder {
    /// Machine-first unless WINBOOT_USER_PATH_FIRST is the literal "true".
    pub fn from_env() -> Self {
        if config::user_path_first() {
            Self::UserFirst
        } else {
            Self::MachineFirst
        }
    }
}

/// Ordered list of directories consulted to resolve bare executable names.
#[derive(Debug, Clone)]
pub struct ProcessEnvironment {
    dirs: Vec<PathBuf>,
}

impl ProcessEnvironment {
    /// Capture the search path inherited from the parent process.
    pub fn from_process() -> Self {
        let dirs = env::var_os("PATH")
            .map(|path| env::split_paths(&path).collect())
            .unwrap_or_default();
        Self::from_dirs(dirs)
    }

    pub fn from_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Joined value for a child's PATH variable. Entries come from
    /// `split_paths` or a persisted-value split and never contain the
    /// platform separator, so joining cannot fail.
    pub fn search_path(&self) -> OsString {
        env::join_paths(&self.dirs).unwrap_or_default()
    }

    /// Resolve a bare executable name against this search path.
    pub fn lookup(&self, name: &str) -> Option<PathBuf> {
        let cwd = env::current_dir().ok()?;
        which::which_in(name, Some(self.search_path()), cwd).ok()
    }

    /// Prepend a directory so it wins resolution.
    pub fn prepend(&mut self, dir: &Path) {
        self.dirs.insert(0, dir.to_path_buf());
    }

    /// Rebuild the search path from the persisted machine- and user-level
    /// values, concatenated in the given order.
    ///
    /// The OS-level stores are read through `runner` (PowerShell on the
    /// target host) so the refresh stays visible to tests.
    pub fn refresh_persisted(
        &mut self,
        runner: &dyn CommandRunner,
        order: PathOrder,
    ) -> Result<()> {
        let machine = persisted_path(runner, self, "Machine")?;
        let user = persisted_path(runner, self, "User")?;
        let joined = match order {
            PathOrder::MachineFirst => format!("{};{}", machine, user),
            PathOrder::UserFirst => format!("{};{}", user, machine),
        };
        // Persisted values are Windows Path strings: always ';'-separated.
        self.dirs = joined
            .split(';')
            .filter(|entry| !entry.is_empty())
            .map(PathBuf::from)
            .collect();
        tracing::debug!(order = ?order, entries = self.dirs.len(), "search path refreshed");
        Ok(())
    }
}

/// Read the persisted Path value for one scope ("Machine" or "User").
fn persisted_path(
    runner: &dyn CommandRunner,
    env: &ProcessEnvironment,
    scope: &str,
) -> Result<String> {
    let parts = vec![
        "powershell".to_string(),
        "-NoProfile".to_string(),
        "-Command".to_string(),
        format!("[Environment]::GetEnvironmentVariable('Path', '{}')", scope),
    ];
    let result = runner.output(&parts, env)?;
    if result.exit_code != 0 {
        tracing::debug!(scope = %scope, stderr = %result.stderr, "persisted path query failed");
        return Err(ExecError::CommandFailed {
            command: exec::command_line(&parts),
            code: result.exit_code,
        }
        .into());
    }
    Ok(result.stdout.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeRunner;

    #[test]
    fn test_prepend_puts_directory_first() {
        let mut env = ProcessEnvironment::from_dirs(vec![PathBuf::from("/usr/bin")]);
        env.prepend(Path::new("/opt/python311"));
        assert_eq!(env.dirs()[0], PathBuf::from("/opt/python311"));
        assert_eq!(env.dirs().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_lookup_resolves_against_explicit_path_only() {
        use crate::testutil::fake_exe;
        let dir = tempfile::TempDir::new().unwrap();
        fake_exe(dir.path(), "pinned-tool");

        let env = ProcessEnvironment::from_dirs(vec![dir.path().to_path_buf()]);
        let found = env.lookup("pinned-tool").unwrap();
        assert_eq!(found, dir.path().join("pinned-tool"));

        let empty = ProcessEnvironment::from_dirs(vec![]);
        assert!(empty.lookup("pinned-tool").is_none());
    }

    #[test]
    fn test_refresh_machine_first_by_default() {
        let runner = FakeRunner::new()
            .with_stdout("'Machine'", "/machine/bin;/machine/tools\n")
            .with_stdout("'User'", "/user/bin\n");
        let mut env = ProcessEnvironment::from_dirs(vec![PathBuf::from("/stale")]);
        env.refresh_persisted(&runner, PathOrder::MachineFirst).unwrap();
        assert_eq!(
            env.dirs(),
            &[
                PathBuf::from("/machine/bin"),
                PathBuf::from("/machine/tools"),
                PathBuf::from("/user/bin"),
            ]
        );
    }

    #[test]
    fn test_refresh_user_first_when_ordered() {
        let runner = FakeRunner::new()
            .with_stdout("'Machine'", "/machine/bin")
            .with_stdout("'User'", "/user/bin");
        let mut env = ProcessEnvironment::from_dirs(vec![]);
        env.refresh_persisted(&runner, PathOrder::UserFirst).unwrap();
        assert_eq!(
            env.dirs(),
            &[PathBuf::from("/user/bin"), PathBuf::from("/machine/bin")]
        );
    }

    #[test]
    fn test_refresh_reads_both_scopes_via_runner() {
        let runner = FakeRunner::new()
            .with_stdout("'Machine'", "/machine/bin")
            .with_stdout("'User'", "/user/bin");
        let mut env = ProcessEnvironment::from_dirs(vec![]);
        env.refresh_persisted(&runner, PathOrder::MachineFirst).unwrap();
        let lines = runner.lines();
        assert!(lines[0].contains("GetEnvironmentVariable('Path', 'Machine')"));
        assert!(lines[1].contains("GetEnvironmentVariable('Path', 'User')"));
    }

    #[test]
    fn test_refresh_fails_when_query_fails() {
        let runner = FakeRunner::new().with_status("GetEnvironmentVariable", 1);
        let mut env = ProcessEnvironment::from_dirs(vec![]);
        let err = env
            .refresh_persisted(&runner, PathOrder::MachineFirst)
            .unwrap_err();
        assert!(err.to_string().contains("exit code 1"));
    }

    #[test]
    fn test_refresh_drops_empty_entries() {
        let runner = FakeRunner::new()
            .with_stdout("'Machine'", "/machine/bin;;")
            .with_stdout("'User'", "");
        let mut env = ProcessEnvironment::from_dirs(vec![]);
        env.refresh_persisted(&runner, PathOrder::MachineFirst).unwrap();
        assert_eq!(env.dirs(), &[PathBuf::from("/machine/bin")]);
    }
}
