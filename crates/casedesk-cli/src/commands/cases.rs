//! Case commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use casedesk::Client;
use casedesk::models::{Case, CaseStatus, CaseType};

use super::{PageArgs, parse_enum, store_message};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct CasesCommand {
    #[command(subcommand)]
    pub command: CasesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CasesSubcommand {
    /// List cases
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only cases with this status (e.g. in_progress)
        #[arg(long)]
        status: Option<String>,

        /// Only cases of this type (e.g. civil)
        #[arg(long = "type")]
        case_type: Option<String>,
    },

    /// Show one case
    Get {
        id: i64,

        /// Print the case as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a case
    Delete { id: i64 },

    /// Show a case's history
    Timeline { id: i64 },
}

pub async fn handle(cmd: CasesCommand, client: &Client) -> Result<()> {
    session::require(client)?;
    let mut store = client.cases_store();

    match cmd.command {
        CasesSubcommand::List {
            page,
            status,
            case_type,
        } => {
            let mut params = page.params();
            if let Some(status) = status {
                let status: CaseStatus = parse_enum(&status, "case status")?;
                params = params.filter("case_status", output::label(&status));
            }
            if let Some(case_type) = case_type {
                let case_type: CaseType = parse_enum(&case_type, "case type")?;
                params = params.filter("case_type", output::label(&case_type));
            }

            let result = store.fetch(params).await;
            let listing = result.context(store_message(store.error(), "Failed to load cases"))?;

            if page.json {
                return output::json_pretty(&listing);
            }
            if listing.items.is_empty() {
                output::note("No cases found.");
                return Ok(());
            }
            for case in &listing.items {
                print_row(case);
            }
            output::page_footer(listing.page, listing.pages, listing.total);
        }
        CasesSubcommand::Get { id, json } => {
            let result = store.fetch_one(id).await;
            let case = result.context(store_message(store.error(), "Failed to load case"))?;

            if json {
                return output::json_pretty(&case);
            }
            print_detail(&case);
        }
        CasesSubcommand::Delete { id } => {
            let result = store.delete(id).await;
            result.context(store_message(store.error(), "Failed to delete case"))?;
            output::success(&format!("Deleted case {}", id));
        }
        CasesSubcommand::Timeline { id } => {
            let result = store.fetch_timeline(id).await;
            let timeline =
                result.context(store_message(store.error(), "Failed to load timeline"))?;

            println!("{}", timeline.case_number.bold());
            if timeline.timeline.is_empty() {
                output::note("No history recorded.");
            }
            for entry in &timeline.timeline {
                println!(
                    "{}  {:<20} {}",
                    entry.date.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                    entry.event_type.cyan(),
                    entry.description
                );
            }
        }
    }

    Ok(())
}

fn print_row(case: &Case) {
    println!(
        "{:>5}  {:<16} {:<12} {}",
        case.id.to_string().dimmed(),
        case.case_number.bold(),
        output::label(&case.case_status).cyan(),
        case.title
    );
}

fn print_detail(case: &Case) {
    output::field("Number", &case.case_number);
    output::field("Title", &case.title);
    output::field("Type", &output::label(&case.case_type));
    output::field("Status", &output::label(&case.case_status));
    output::field("Opened", &case.open_date.to_string());
    output::optional_field("Closed", case.close_date.map(|d| d.to_string()).as_deref());
    output::optional_field("Court", case.court.as_deref());
    output::optional_field("Judge", case.judge.as_deref());
    output::optional_field("Plaintiff", case.plaintiff.as_deref());
    output::optional_field("Defendant", case.defendant.as_deref());
    output::optional_field("Description", case.description.as_deref());
    if !case.tags.is_empty() {
        output::field("Tags", &case.tags.join(", "));
    }
}
