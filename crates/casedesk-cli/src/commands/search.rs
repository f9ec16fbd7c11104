//! Search command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use casedesk::Client;
use casedesk::models::SearchParams;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to search for
    pub query: String,

    /// Restrict to one kind: cases, persons, documents or legal_acts
    #[arg(long = "type")]
    pub search_type: Option<String>,

    /// Maximum hits per kind
    #[arg(long)]
    pub limit: Option<u32>,

    /// Search recognized document text instead
    #[arg(long, conflicts_with = "semantic")]
    pub fulltext: bool,

    /// Use the semantic index
    #[arg(long)]
    pub semantic: bool,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SearchArgs, client: &Client) -> Result<()> {
    session::require(client)?;
    let search = client.api().search();

    if args.semantic {
        let results = search
            .semantic(&args.query)
            .await
            .context("Semantic search failed")?;
        if args.json {
            return output::json_pretty(&results);
        }
        if let Some(message) = &results.message {
            output::note(message);
        }
        for hit in &results.results {
            output::json_pretty(hit)?;
        }
        return Ok(());
    }

    if args.fulltext {
        let results = search
            .fulltext(&args.query)
            .await
            .context("Full-text search failed")?;
        if args.json {
            return output::json_pretty(&results);
        }
        for hit in &results.documents {
            println!(
                "{:>5}  {:>6.2}  {}",
                hit.id.to_string().dimmed(),
                hit.relevance_score,
                hit.file_name
            );
        }
        output::note(&format!("{} documents", results.total));
        return Ok(());
    }

    let params = SearchParams {
        search_type: args.search_type,
        limit: args.limit,
    };
    let results = search
        .global(&args.query, &params)
        .await
        .context("Search failed")?;

    if args.json {
        return output::json_pretty(&results);
    }

    section("Cases", results.cases.len());
    for hit in &results.cases {
        println!("  {:<16} {}", hit.case_number, hit.title);
    }
    section("Persons", results.persons.len());
    for hit in &results.persons {
        println!("  {:>5}  {}", hit.id, hit.full_name);
    }
    section("Documents", results.documents.len());
    for hit in &results.documents {
        println!("  {:>5}  {}", hit.id, hit.file_name);
    }
    section("Legal acts", results.legal_acts.len());
    for hit in &results.legal_acts {
        println!("  {:>5}  {}", hit.id, hit.title);
    }
    output::note(&format!("{} results", results.total));

    Ok(())
}

fn section(title: &str, count: usize) {
    if count > 0 {
        println!("{} ({})", title.bold(), count);
    }
}
