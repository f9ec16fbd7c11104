//! Calendar commands.

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::{Args, Subcommand};
use colored::Colorize;

use casedesk::Client;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub command: EventsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EventsSubcommand {
    /// Events in the next seven days
    Upcoming {
        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },

    /// Events in one month (defaults to the current month)
    Calendar {
        /// Year, e.g. 2024
        #[arg(long)]
        year: Option<i32>,

        /// Month, 1 to 12
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle(cmd: EventsCommand, client: &Client) -> Result<()> {
    session::require(client)?;
    let api = client.api();

    match cmd.command {
        EventsSubcommand::Upcoming { json } => {
            let upcoming = api
                .events()
                .upcoming_week()
                .await
                .context("Failed to load upcoming events")?;

            if json {
                return output::json_pretty(&upcoming);
            }
            if upcoming.events.is_empty() {
                output::note("Nothing scheduled in the next seven days.");
                return Ok(());
            }
            for event in &upcoming.events {
                let when = event.event_date.format("%a %d %b %H:%M").to_string();
                let when = if event.is_urgent {
                    when.red().bold()
                } else {
                    when.normal()
                };
                println!(
                    "{}  {:<16} {:<14} {}",
                    when,
                    event.case_number.as_deref().unwrap_or("-"),
                    output::label(&event.event_type).cyan(),
                    event.description
                );
            }
        }
        EventsSubcommand::Calendar { year, month, json } => {
            let today = Local::now().date_naive();
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());

            let calendar = api
                .events()
                .calendar(year, month)
                .await
                .context("Failed to load calendar")?;

            if json {
                return output::json_pretty(&calendar);
            }
            println!("{}", format!("{}-{:02}", calendar.year, calendar.month).bold());
            if calendar.events.is_empty() {
                output::note("No events this month.");
            }
            for event in &calendar.events {
                println!(
                    "{}  {:<16} {:<14} {}",
                    event.event_date.format("%d %H:%M").to_string().dimmed(),
                    event.case_number.as_deref().unwrap_or("-"),
                    output::label(&event.event_status).cyan(),
                    event.description
                );
            }
        }
    }

    Ok(())
}
