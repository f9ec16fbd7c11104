//! Session commands: logout, whoami, refresh-token.

use anyhow::{Context, Result, bail};
use colored::Colorize;

use casedesk::Client;

use crate::output;
use crate::session::{self, LOGIN_HINT};

pub async fn logout(client: &Client) -> Result<()> {
    let had_session = client.session().is_authenticated();
    client.auth_store().logout().await;

    if had_session {
        output::success("Logged out");
    } else {
        output::note("No active session.");
    }
    Ok(())
}

pub async fn whoami(client: &Client, json: bool) -> Result<()> {
    session::require(client)?;

    let mut auth = client.auth_store();
    if !auth.check_auth().await {
        bail!("Session is no longer valid. Run 'casedesk login' to sign in again.");
    }
    let user = auth.user().context(LOGIN_HINT)?;

    if json {
        return output::json_pretty(&user);
    }

    output::field("User", &user.username);
    output::field("Name", &user.full_name);
    output::field("Email", &user.email);
    output::field("Role", &output::label(&user.role));
    if !user.is_active {
        println!("{}", "account disabled".red());
    }
    output::field("API", client.gateway().base_url().as_str());

    Ok(())
}

pub async fn refresh_token(client: &Client) -> Result<()> {
    session::require(client)?;

    eprintln!("{}", "Refreshing session...".dimmed());

    client
        .auth_store()
        .refresh_access_token()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    Ok(())
}
