//! Command-line interface

use clap::Parser;

/// Check which DNS resolvers your system really uses
#[derive(Parser, Debug, Clone)]
#[command(name = "dnsleak")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable color output
    #[arg(short = 'n', long = "no-color")]
    pub no_color: bool,

    /// Show elapsed time for the lookup phase
    #[arg(short = 'e', long = "elapsed")]
    pub elapsed: bool,
}
