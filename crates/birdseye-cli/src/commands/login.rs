//! Login command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use birdseye_client::Client;
use birdseye_core::{BaseUrl, Credentials};

use crate::output;
use crate::store::FileTokenStore;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to authenticate with
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Server base URL
    #[arg(long, default_value = "http://localhost:8088")]
    pub url: String,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let base = BaseUrl::new(&args.url).context("Invalid server URL")?;

    let store = FileTokenStore::open_default()?;
    store.set_base_url(&base);

    eprintln!("{}", "Logging in...".dimmed());

    let client = Client::with_store(base.clone(), Arc::new(store));
    client
        .login(&Credentials::new(&args.username, &args.password))
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Server", base.as_str());
    output::field("User", &args.username);

    Ok(())
}
