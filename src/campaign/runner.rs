//! Campaign runners: credential-list replay and password spray.
//!
//! Both modes iterate their input strictly in order through the classifier,
//! one browser round-trip per entry, with a fixed pause after every attempt
//! so the target is never hammered. Outcome lines stream as they happen and
//! are also retained in the ordered report. No retries, no early exit: the
//! point of a campaign is exhaustive coverage, not a single hit.

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;
use tokio::time::sleep;

use crate::browser::{BrowserHandle, WaitPolicy};
use crate::classifier;
use crate::outcome::AttemptOutcome;

use super::input::CredentialPair;

/// Pacing for one campaign: per-attempt wait policy plus the fixed pause
/// inserted after every attempt regardless of outcome.
#[derive(Debug, Clone)]
pub struct RunPolicy {
    pub wait: WaitPolicy,
    pub pause: Duration,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            wait: WaitPolicy::default(),
            pause: Duration::from_millis(500),
        }
    }
}

/// One (identity, outcome) row of a campaign report.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub username: Option<String>,
    pub password: Option<String>,
    pub outcome: AttemptOutcome,
}

/// Ordered outcomes of a whole campaign: exactly one record per input entry,
/// in input order.
#[derive(Debug, Clone, Default)]
pub struct CampaignReport {
    records: Vec<AttemptRecord>,
}

impl CampaignReport {
    pub fn records(&self) -> &[AttemptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Usernames whose attempt succeeded, in attempt order. The spray
    /// summary; empty is a valid, reportable result.
    pub fn successful_usernames(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|record| record.outcome.is_success())
            .filter_map(|record| record.username.as_deref())
            .collect()
    }
}

/// Replay every pair from a credentials file against the target.
pub async fn run_credential_list(
    handle: &dyn BrowserHandle,
    base_url: &str,
    pairs: &[CredentialPair],
    policy: &RunPolicy,
) -> CampaignReport {
    let mut report = CampaignReport::default();
    for pair in pairs {
        let username = pair.username.as_deref().unwrap_or_default();
        let password = pair.password.as_deref().unwrap_or_default();
        let outcome = run_one(handle, base_url, username, password, policy).await;
        report.records.push(AttemptRecord {
            username: pair.username.clone(),
            password: pair.password.clone(),
            outcome,
        });
    }
    report
}

/// Try one fixed password against every username in the list.
pub async fn run_password_spray(
    handle: &dyn BrowserHandle,
    base_url: &str,
    usernames: &[String],
    password: &str,
    policy: &RunPolicy,
) -> CampaignReport {
    let mut report = CampaignReport::default();
    for username in usernames {
        let outcome = run_one(handle, base_url, username, password, policy).await;
        report.records.push(AttemptRecord {
            username: Some(username.clone()),
            password: Some(password.to_string()),
            outcome,
        });
    }
    report
}

/// One attempt: the report line streams before the next attempt starts, then
/// the fixed pause applies whatever the outcome was.
async fn run_one(
    handle: &dyn BrowserHandle,
    base_url: &str,
    username: &str,
    password: &str,
    policy: &RunPolicy,
) -> AttemptOutcome {
    print!("Trying {}:{} ... ", username, password);
    let _ = io::stdout().flush();

    let outcome = classifier::attempt(handle, base_url, username, password, &policy.wait).await;
    match &outcome {
        AttemptOutcome::Success(evidence) => {
            println!("{} -> {}", "SUCCESS".green().bold(), evidence)
        }
        AttemptOutcome::Failure(reason) => println!("{} -> {}", "FAIL".red(), reason),
    }

    sleep(policy.pause).await;
    outcome
}
