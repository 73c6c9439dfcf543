//! The provisioning sequence: package manager, interpreter, handoff.
//!
//! Strictly linear, no branch loops back. Each step takes the capabilities
//! it needs explicitly so the whole sequence runs end to end against fakes.

mod handoff;
mod interpreter;
mod package_manager;

use crate::config::Config;
use crate::exec::CommandRunner;
use crate::fetch::InstallerFetcher;
use crate::pathenv::ProcessEnvironment;
use crate::platform;
use anyhow::Result;

pub struct Provisioner<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    fetcher: &'a dyn InstallerFetcher,
    env: ProcessEnvironment,
}

impl<'a> Provisioner<'a> {
    pub fn new(
        config: &'a Config,
        runner: &'a dyn CommandRunner,
        fetcher: &'a dyn InstallerFetcher,
        env: ProcessEnvironment,
    ) -> Self {
        Self {
            config,
            runner,
            fetcher,
            env,
        }
    }

    /// Run the full sequence and return the exit code to report.
    pub fn run(&mut self, args: &[String]) -> Result<i32> {
        package_manager::ensure(
            self.config,
            self.runner,
            self.fetcher,
            &mut self.env,
            platform::is_elevated(),
        )?;
        let interpreter = interpreter::ensure(self.config, self.runner, &mut self.env)?;
        handoff::run(self.config, self.runner, &self.env, &interpreter, args)
    }
}
