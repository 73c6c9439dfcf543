mod cli;
mod config;
mod exec;
mod fetch;
mod observability;
mod pathenv;
mod platform;
mod provision;

#[cfg(test)]
mod testutil;

use clap::Parser;

fn main() {
    observability::init_tracing();
    let cli = cli::Cli::parse();

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}

fn run(cli: &cli::Cli) -> anyhow::Result<i32> {
    let config = config::Config::from_env();
    log_startup(&cli.args);

    let runner = exec::SystemRunner;
    let fetcher = fetch::HttpFetcher::new();
    let env = pathenv::ProcessEnvironment::from_process();
    tracing::debug!(path_entries = env.dirs().len(), "captured search path");

    let mut provisioner = provision::Provisioner::new(&config, &runner, &fetcher, env);
    provisioner.run(&cli.args)
}

/// Debug dump of the inherited environment and the forwarded arguments.
fn log_startup(args: &[String]) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        for (key, value) in std::env::vars() {
            tracing::debug!(%key, %value, "inherited env");
        }
    }
    tracing::debug!(?args, "arguments forwarded to build script");
}
