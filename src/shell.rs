//! Interactive session shell.
//!
//! Presents the campaign menu, collects file paths and the spray password,
//! and prints end-of-campaign summaries. Loader problems are reported and
//! drop back to the menu; only prompt-level failures propagate.

use std::path::Path;

use colored::Colorize;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::browser::BrowserHandle;
use crate::campaign::{self, RunPolicy};
use crate::cli::Cli;
use crate::error::{CredprobeError, Result};

const DEFAULT_CREDS_FILE: &str = "creds.json";
const DEFAULT_USERNAMES_FILE: &str = "usernames.txt";

/// Menu theme with indented option items.
fn menu_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()).for_stderr(),
        active_item_prefix: style("  › ".to_string()).for_stderr().green(),
        inactive_item_prefix: style("    ".to_string()).for_stderr(),
        ..ColorfulTheme::default()
    }
}

/// Run the interactive loop until the operator quits.
///
/// The browser handle is owned by the caller and reused serially across
/// every campaign selected during the session.
pub async fn run(cli: &Cli, handle: &dyn BrowserHandle) -> Result<()> {
    loop {
        println!();
        let options = vec![
            "Credential list — replay username:password pairs from a JSON file",
            "Password spray  — one password against a username list",
            "Quit",
        ];
        let choice = Select::with_theme(&menu_theme())
            .with_prompt("Select mode")
            .items(&options)
            .default(0)
            .report(false)
            .interact()
            .map_err(|e| CredprobeError::Prompt(e.to_string()))?;

        match choice {
            0 => credential_list(cli, handle).await?,
            1 => password_spray(cli, handle).await?,
            _ => {
                println!("Bye!");
                return Ok(());
            }
        }
    }
}

async fn credential_list(cli: &Cli, handle: &dyn BrowserHandle) -> Result<()> {
    let path: String = Input::with_theme(&menu_theme())
        .with_prompt("Credentials JSON path")
        .default(DEFAULT_CREDS_FILE.to_string())
        .interact_text()
        .map_err(|e| CredprobeError::Prompt(e.to_string()))?;

    let pairs = match campaign::load_credential_pairs(Path::new(&path)) {
        Ok(pairs) => pairs,
        Err(e) => {
            println!("  {} {}", "!".yellow(), e);
            return Ok(());
        }
    };

    println!();
    campaign::run_credential_list(handle, &cli.url, &pairs, &RunPolicy::default()).await;
    Ok(())
}

async fn password_spray(cli: &Cli, handle: &dyn BrowserHandle) -> Result<()> {
    let password: String = Input::with_theme(&menu_theme())
        .with_prompt("Password to spray")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CredprobeError::Prompt(e.to_string()))?;
    let password = password.trim().to_string();
    if password.is_empty() {
        println!("  {} Password cannot be empty.", "!".yellow());
        return Ok(());
    }

    let path: String = Input::with_theme(&menu_theme())
        .with_prompt("Usernames file path")
        .default(DEFAULT_USERNAMES_FILE.to_string())
        .interact_text()
        .map_err(|e| CredprobeError::Prompt(e.to_string()))?;

    let usernames = match campaign::load_usernames(Path::new(&path)) {
        Ok(usernames) => usernames,
        Err(e) => {
            println!("  {} {}", "!".yellow(), e);
            return Ok(());
        }
    };

    println!(
        "\nSpraying password '{}' against {} usernames...\n",
        password,
        usernames.len()
    );
    let report =
        campaign::run_password_spray(handle, &cli.url, &usernames, &password, &RunPolicy::default())
            .await;

    let hits = report.successful_usernames();
    println!("\n--- Summary ---");
    if hits.is_empty() {
        println!("No users found with password '{}'", password);
    } else {
        println!(
            "Users with password '{}': {}",
            password,
            hits.join(", ").green().bold()
        );
    }
    Ok(())
}
