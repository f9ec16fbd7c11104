//! Client construction and session persistence for the CLI.

pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use casedesk::error::AuthError;
use casedesk::{ApiUrl, Client, ClientConfig, Navigation, Navigator};

use crate::cli::Cli;
use crate::output;

/// Hint printed when the session is gone.
pub const LOGIN_HINT: &str = "No active session. Run 'casedesk login' first.";

/// Reacts to the gateway tearing the session down.
#[derive(Debug, Default)]
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn navigate(&self, to: Navigation) {
        match to {
            Navigation::Login => {
                output::warning("Session expired. Run 'casedesk login' to sign in again.")
            }
            Navigation::Path(path) => debug!(%path, "Ignoring navigation"),
        }
    }
}

/// Build the client configuration from the global flags.
pub fn config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::default();

    if let Some(url) = &cli.api_url {
        config.base_url = ApiUrl::new(url).context("Invalid API URL")?;
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    Ok(config)
}

/// Open a client over the stored session.
pub fn open(cli: &Cli) -> Result<Client> {
    let config = config(cli)?;
    let store = storage::open_store()?;
    debug!(path = %store.path().display(), api = %config.base_url, "Opening session");

    Client::restore(&config, store, Arc::new(CliNavigator)).context("Failed to load session")
}

/// Fail unless a session is held.
pub fn require(client: &Client) -> Result<()> {
    if client.session().is_authenticated() {
        Ok(())
    } else {
        Err(AuthError::NotAuthenticated).context(LOGIN_HINT)
    }
}
