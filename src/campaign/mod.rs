//! Campaign modes over a shared browser handle.

mod input;
mod runner;

pub use input::{load_credential_pairs, load_usernames, CredentialPair};
pub use runner::{
    run_credential_list, run_password_spray, AttemptRecord, CampaignReport, RunPolicy,
};
