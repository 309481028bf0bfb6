//! Health command implementation.

use anyhow::{Context, Result};
use clap::Args;

use birdseye_client::Client;
use birdseye_core::BaseUrl;

use crate::output;
use crate::store;

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Server base URL; defaults to the stored session's server
    #[arg(long)]
    pub url: Option<String>,
}

pub async fn run(args: HealthArgs) -> Result<()> {
    let client = match &args.url {
        Some(url) => Client::new(BaseUrl::new(url).context("Invalid server URL")?),
        None => store::open_client()?,
    };

    let body = client
        .health()
        .await
        .context("Server health check failed")?;

    output::success("Server is reachable");
    output::field("Status", body.trim());
    Ok(())
}
