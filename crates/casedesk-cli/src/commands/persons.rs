//! Person commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use casedesk::Client;
use casedesk::models::{Person, PersonType};

use super::{PageArgs, parse_enum, store_message};
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct PersonsCommand {
    #[command(subcommand)]
    pub command: PersonsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PersonsSubcommand {
    /// List persons
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only persons of this type (e.g. client, judge)
        #[arg(long = "type")]
        person_type: Option<String>,
    },

    /// Show one person
    Get {
        id: i64,

        /// Also list the cases the person is involved in
        #[arg(long)]
        cases: bool,

        /// Print the person as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle(cmd: PersonsCommand, client: &Client) -> Result<()> {
    session::require(client)?;
    let mut store = client.persons_store();

    match cmd.command {
        PersonsSubcommand::List { page, person_type } => {
            let mut params = page.params();
            if let Some(person_type) = person_type {
                let person_type: PersonType = parse_enum(&person_type, "person type")?;
                params = params.filter("person_type", output::label(&person_type));
            }

            let result = store.fetch(params).await;
            let listing = result.context(store_message(store.error(), "Failed to load persons"))?;

            if page.json {
                return output::json_pretty(&listing);
            }
            if listing.items.is_empty() {
                output::note("No persons found.");
                return Ok(());
            }
            for person in &listing.items {
                println!(
                    "{:>5}  {:<10} {}",
                    person.id.to_string().dimmed(),
                    output::label(&person.person_type).cyan(),
                    person.full_name
                );
            }
            output::page_footer(listing.page, listing.pages, listing.total);
        }
        PersonsSubcommand::Get { id, cases, json } => {
            let result = store.fetch_one(id).await;
            let person = result.context(store_message(store.error(), "Failed to load person"))?;

            let involvement = if cases {
                Some(
                    client
                        .api()
                        .persons()
                        .cases(id)
                        .await
                        .context("Failed to load the person's cases")?,
                )
            } else {
                None
            };

            if json {
                output::json_pretty(&person)?;
                if let Some(involvement) = &involvement {
                    output::json_pretty(involvement)?;
                }
                return Ok(());
            }

            print_detail(&person);
            if let Some(involvement) = involvement {
                println!();
                println!("{} ({})", "Cases".bold(), involvement.total_cases);
                for case in &involvement.cases {
                    let role = case.role_in_case.as_deref().unwrap_or("-");
                    println!(
                        "  {:<16} {:<12} {:<12} {}",
                        case.case_number,
                        output::label(&case.case_status).cyan(),
                        role,
                        case.title
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_detail(person: &Person) {
    output::field("Name", &person.full_name);
    output::field("Type", &output::label(&person.person_type));
    output::optional_field("IDNP", person.idnp.as_deref());
    output::optional_field("Organization", person.organization.as_deref());
    output::optional_field("IDNO", person.idno.as_deref());
    output::optional_field("Phone", person.phone.as_deref());
    output::optional_field("Email", person.email.as_deref());
    output::optional_field("Address", person.address_actual.as_deref());
    output::optional_field("Notes", person.notes.as_deref());
}
