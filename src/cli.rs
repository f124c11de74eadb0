//! Command-line surface.
//!
//! The functional surface is deliberately small: the target base URL and the
//! headless toggle. Everything else is collected interactively by the shell.

use clap::Parser;

/// Test a login form's resistance to credential guessing.
///
/// Drives a real browser against the target's login page in two campaign
/// modes: credential-list replay and password spray. Only run this against
/// targets you own or are authorized to test.
#[derive(Debug, Parser)]
#[command(name = "credprobe", version, about)]
pub struct Cli {
    /// Base URL of the target site
    #[arg(long, default_value = "http://127.0.0.1:8080", env = "CREDPROBE_URL")]
    pub url: String,

    /// Run the browser in headless mode
    #[arg(long)]
    pub headless: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
