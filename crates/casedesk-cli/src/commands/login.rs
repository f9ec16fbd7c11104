//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use casedesk::{Client, Credentials};

use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, client: &Client) -> Result<()> {
    let credentials = Credentials::new(&args.username, &args.password);
    let mut auth = client.auth_store();

    eprintln!("{}", "Logging in...".dimmed());

    let result = auth.login(&credentials).await;
    let message = super::store_message(auth.error(), "Login failed");
    result.context(message)?;

    output::success("Logged in successfully");
    println!();
    match auth.user() {
        Some(user) => {
            output::field("User", &user.username);
            output::field("Name", &user.full_name);
            output::field("Role", &output::label(&user.role));
        }
        None => output::warning("Signed in but the profile could not be loaded"),
    }
    output::field("API", client.gateway().base_url().as_str());

    Ok(())
}
