//! Installer download over HTTP(S).
//!
//! A capability trait for the same reason as `CommandRunner`: the package
//! manager step must be testable without touching the network.

use anyhow::{Context, Result};
use std::time::Duration;

/// Capability for fetching an installer script body.
pub trait InstallerFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Production fetcher backed by a sync HTTP client.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(10))
                .timeout_read(Duration::from_secs(30))
                .build(),
        }
    }
}

impl InstallerFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                anyhow::anyhow!("Installer download returned HTTP {} for {}", code, url)
            }
            ureq::Error::Transport(_) => {
                anyhow::anyhow!("Cannot reach {} : {}", url, e)
            }
        })?;
        response
            .into_string()
            .with_context(|| format!("Read installer body from {}", url))
    }
}
