//! CLI argument definitions.

use clap::{Parser, Subcommand};

use casedesk::config::{API_URL_ENV, TIMEOUT_ENV};

use crate::commands::{
    cases::CasesCommand, documents::DocumentsCommand, events::EventsCommand, login::LoginArgs,
    persons::PersonsCommand, search::SearchArgs,
};

/// Command-line client for the CaseDesk case-management API.
#[derive(Parser, Debug)]
#[command(name = "casedesk")]
#[command(author, version = env!("CASEDESK_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL
    #[arg(long, env = API_URL_ENV, global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = TIMEOUT_ENV, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Display the signed-in user
    Whoami {
        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Exchange the refresh token for a new access token
    RefreshToken,

    /// Case operations
    Cases(CasesCommand),

    /// Document operations
    Documents(DocumentsCommand),

    /// Person operations
    Persons(PersonsCommand),

    /// Calendar and upcoming events
    Events(EventsCommand),

    /// Search cases, persons, documents and legal acts
    Search(SearchArgs),

    /// Case statistics
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}
