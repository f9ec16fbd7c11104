//! Subcommand implementations.

pub mod auth;
pub mod cases;
pub mod documents;
pub mod events;
pub mod login;
pub mod persons;
pub mod search;
pub mod stats;

use anyhow::{Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;

use casedesk::Client;
use casedesk::models::ListParams;

use crate::cli::Commands;

pub async fn handle(cmd: Commands, client: &Client) -> Result<()> {
    match cmd {
        Commands::Login(args) => login::run(args, client).await,
        Commands::Logout => auth::logout(client).await,
        Commands::Whoami { json } => auth::whoami(client, json).await,
        Commands::RefreshToken => auth::refresh_token(client).await,
        Commands::Cases(cmd) => cases::handle(cmd, client).await,
        Commands::Documents(cmd) => documents::handle(cmd, client).await,
        Commands::Persons(cmd) => persons::handle(cmd, client).await,
        Commands::Events(cmd) => events::handle(cmd, client).await,
        Commands::Search(args) => search::run(args, client).await,
        Commands::Stats { json } => stats::run(client, json).await,
    }
}

/// Paging and free-text filter shared by the list commands.
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub size: Option<u32>,

    /// Free-text filter
    #[arg(long)]
    pub search: Option<String>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

impl PageArgs {
    pub fn params(&self) -> ListParams {
        let mut params = ListParams::new();
        if let Some(page) = self.page {
            params = params.page(page);
        }
        if let Some(size) = self.size {
            params = params.size(size);
        }
        if let Some(search) = &self.search {
            params = params.search(search);
        }
        params
    }
}

/// Parse a wire enum name such as `court_decision` given on the command line.
pub(crate) fn parse_enum<T: DeserializeOwned>(value: &str, what: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .with_context(|| format!("Unknown {} '{}'", what, value))
}

/// Turn a store's recorded message into the error context.
pub(crate) fn store_message(error: Option<&str>, fallback: &str) -> String {
    error.unwrap_or(fallback).to_string()
}
