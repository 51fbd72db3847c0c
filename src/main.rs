//! DNS Leak Tester - Main CLI Application

use clap::Parser;
use dnsleak_tester::{app::App, cli::Cli};
use std::io::IsTerminal;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = App::new(cli).run().await {
        eprintln!("{}", e.format_for_console(use_color));
        eprintln!();
        eprintln!("Suggestion: {}", e.suggestion());
        process::exit(e.exit_code());
    }
}
