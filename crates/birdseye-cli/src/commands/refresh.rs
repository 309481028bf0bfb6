//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::store;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs) -> Result<()> {
    let client = store::open_client()?;

    client
        .session()
        .refresh()
        .await
        .context("Failed to refresh the session")?;

    output::success("Session refreshed");
    Ok(())
}
