//! `portalauth login <username>` — interactive login.
//!
//! Prompts for the password, runs the login through the session manager,
//! and renders the outcome inline. Failures print the service's message
//! (or a generic one) and exit non-zero; no stack traces for expected
//! rejections.

use pa_domain::config::Config;
use pa_session::{LoginOutcome, SessionState};

pub async fn run(config: &Config, username: &str) -> anyhow::Result<()> {
    let session = super::build_session(config)?;

    // Resolve any persisted session first; a fresh login replaces it
    // wholesale.
    if session.initialize().await == SessionState::Authenticated {
        let user = session.user().expect("authenticated session has a user");
        eprintln!("Already logged in as {}; replacing session.", user.username);
    }

    eprint!("Password for {username}: ");
    let password = rpassword::read_password()?;

    match session.login(username, &password).await {
        LoginOutcome::Success => match session.state() {
            SessionState::Authenticated => {
                let user = session.user().expect("authenticated session has a user");
                println!("Logged in as {}.", user.username);
                Ok(())
            }
            // The credential was accepted at login but the follow-up
            // resolution invalidated it.
            _ => {
                eprintln!("Login was accepted but the session could not be established. Try again.");
                std::process::exit(1);
            }
        },
        LoginOutcome::Failure { error } => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
