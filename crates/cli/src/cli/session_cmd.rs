//! `portalauth status` / `whoami` / `logout` — session inspection and
//! teardown.

use pa_domain::config::Config;
use pa_session::SessionState;

/// Resolve the persisted session, if any, and report where it stands.
pub async fn status(config: &Config) -> anyhow::Result<()> {
    let session = super::build_session(config)?;

    match session.initialize().await {
        SessionState::Authenticated => {
            let user = session.user().expect("authenticated session has a user");
            println!("Logged in as {}.", user.username);
        }
        SessionState::Unauthenticated => {
            println!("Not logged in.");
        }
        // initialize() always settles; a hung backend surfaces as a
        // transport failure, not this state.
        SessionState::Resolving => unreachable!("initialize returned before settling"),
    }
    Ok(())
}

/// Print the resolved user record as JSON. Exits non-zero when there is no
/// valid session.
pub async fn whoami(config: &Config) -> anyhow::Result<()> {
    let session = super::build_session(config)?;

    if session.initialize().await != SessionState::Authenticated {
        eprintln!("Not logged in.");
        std::process::exit(1);
    }

    let user = session.user().expect("authenticated session has a user");
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

/// Tear down the session. No network call; succeeds even when nothing was
/// persisted.
pub fn logout(config: &Config) -> anyhow::Result<()> {
    let session = super::build_session(config)?;
    session.logout();
    println!("Logged out.");
    Ok(())
}
