//! Statistics command implementation.

use anyhow::{Context, Result};
use colored::Colorize;

use casedesk::Client;

use crate::output;
use crate::session;

pub async fn run(client: &Client, json: bool) -> Result<()> {
    session::require(client)?;

    let stats = client
        .api()
        .reports()
        .statistics()
        .await
        .context("Failed to load statistics")?;

    if json {
        return output::json_pretty(&stats);
    }

    output::field("Cases", &stats.total_cases.to_string());
    output::field("Documents", &stats.total_documents.to_string());

    if !stats.cases_by_status.is_empty() {
        println!();
        println!("{}", "By status".bold());
        for (status, count) in &stats.cases_by_status {
            println!("  {:<14} {}", status, count);
        }
    }
    if !stats.cases_by_type.is_empty() {
        println!();
        println!("{}", "By type".bold());
        for (case_type, count) in &stats.cases_by_type {
            println!("  {:<14} {}", case_type, count);
        }
    }

    Ok(())
}
