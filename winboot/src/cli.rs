use clap::Parser;

/// Provision this machine: ensure the package manager and the pinned Python
/// are installed, then run the project build script.
#[derive(Parser, Debug)]
#[command(name = "winboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arguments forwarded verbatim to the build script
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
