//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::store;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let client = store::open_client()?;

    let user = client
        .current_user()
        .await
        .context("Failed to fetch the current user")?;

    output::field("Server", client.base().as_str());
    if let Some(username) = &user.username {
        output::field("User", username);
    }
    let name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !name.is_empty() {
        output::field("Name", &name);
    }
    if let Some(email) = &user.email {
        output::field("Email", email);
    }

    Ok(())
}
