//! Configuration for winboot.
//!
//! All configuration is read from environment variables, with compiled
//! defaults otherwise. No configuration file is used.
//!
//! Environment variable keys are centralized here for consistency.

use std::path::{Path, PathBuf};

/// Environment variable key constants.
/// Use these when reading env vars to avoid typos and enable refactoring.
pub mod env_keys {
    pub const WINBOOT_PYTHON_VERSION: &str = "WINBOOT_PYTHON_VERSION";
    pub const WINBOOT_INSTALLER_URL: &str = "WINBOOT_INSTALLER_URL";
    pub const WINBOOT_VERSIONS_BUCKET_URL: &str = "WINBOOT_VERSIONS_BUCKET_URL";
    pub const WINBOOT_USER_PATH_FIRST: &str = "WINBOOT_USER_PATH_FIRST";
    pub const WINBOOT_LOG_LEVEL: &str = "WINBOOT_LOG_LEVEL";
    pub const WINBOOT_QUIET: &str = "WINBOOT_QUIET";
    pub const WINBOOT_LOG_JSON: &str = "WINBOOT_LOG_JSON";
}

/// Python version installed when none is pinned via env.
pub const DEFAULT_PYTHON_VERSION: &str = "3.11";

/// Scoop installer script location.
pub const DEFAULT_INSTALLER_URL: &str = "https://get.scoop.sh";

/// Bucket holding versioned interpreter manifests (python311.json etc.).
pub const DEFAULT_VERSIONS_BUCKET_URL: &str =
    "https://raw.githubusercontent.com/ScoopInstaller/Versions/master/bucket";

/// Fixed name of the follow-on build script, looked up next to the binary.
pub const HANDOFF_SCRIPT: &str = "build.py";

/// Immutable per-run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interpreter version to provision, e.g. "3.11"
    pub python_version: String,
    /// URL of the package manager installer script
    pub installer_url: String,
    /// Base URL for versioned interpreter manifests
    pub versions_bucket_url: String,
    /// Directory searched for the handoff script
    pub handoff_dir: PathBuf,
}

impl Config {
    /// Build the configuration from env overrides and compiled defaults.
    pub fn from_env() -> Self {
        Self {
            python_version: env_or(env_keys::WINBOOT_PYTHON_VERSION, DEFAULT_PYTHON_VERSION),
            installer_url: env_or(env_keys::WINBOOT_INSTALLER_URL, DEFAULT_INSTALLER_URL),
            versions_bucket_url: env_or(
                env_keys::WINBOOT_VERSIONS_BUCKET_URL,
                DEFAULT_VERSIONS_BUCKET_URL,
            ),
            handoff_dir: default_handoff_dir(),
        }
    }

    /// Versioned executable name: "3.11" yields "python311".
    pub fn interpreter_name(&self) -> String {
        format!("python{}", self.python_version.replace('.', ""))
    }

    /// Manifest URL the package manager installs the interpreter from.
    pub fn interpreter_manifest_url(&self) -> String {
        format!("{}/{}.json", self.versions_bucket_url, self.interpreter_name())
    }

    /// Full path of the handoff script (which may or may not exist).
    pub fn handoff_script(&self) -> PathBuf {
        self.handoff_dir.join(HANDOFF_SCRIPT)
    }
}

/// Whether the user-level persisted path should precede the machine-level one
/// when the search path is rebuilt. Some CI images install the package manager
/// per-user while a machine-wide interpreter must not shadow it.
pub fn user_path_first() -> bool {
    std::env::var(env_keys::WINBOOT_USER_PATH_FIRST).is_ok_and(|v| is_true_literal(&v))
}

/// The flag is compared against the literal string "true"; anything else,
/// including "1" and "TRUE", leaves the default order.
fn is_true_literal(value: &str) -> bool {
    value == "true"
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// The handoff script lives next to the provisioner binary; fall back to the
/// working directory when the executable path cannot be resolved.
fn default_handoff_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Observability knobs, read directly from env.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        let quiet = std::env::var(env_keys::WINBOOT_QUIET)
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        let log_level = std::env::var(env_keys::WINBOOT_LOG_LEVEL)
            .unwrap_or_else(|_| "winboot=info".to_string());
        let log_json = std::env::var(env_keys::WINBOOT_LOG_JSON).is_ok_and(|v| v == "1");
        Self {
            quiet,
            log_level,
            log_json,
        }
    }
}
