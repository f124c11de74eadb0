use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use credprobe::browser::{LaunchOptions, WebDriverSession};
use credprobe::cli::Cli;
use credprobe::{shell, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "credprobe=debug"
    } else {
        "credprobe=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    println!("{}", "credprobe — login form resilience tester".bold());
    println!("  {}  Target: {}", "◆".cyan(), cli.url.cyan());
    println!(
        "  {}  Starting chromedriver session{}...",
        "◆".cyan(),
        if cli.headless { " (headless)" } else { "" }
    );

    // The one fatal acquisition: no browser, no run.
    let session = WebDriverSession::launch(&LaunchOptions {
        headless: cli.headless,
    })
    .await?;
    println!("  {}  Browser ready", "✓".green());

    // The session is released on every exit path, shell failures included;
    // kill-on-drop covers panics.
    let result = shell::run(cli, &session).await;
    if let Err(e) = session.close().await {
        tracing::warn!("browser shutdown failed: {}", e);
    }
    result
}
