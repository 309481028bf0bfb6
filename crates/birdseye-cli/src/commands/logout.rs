//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use birdseye_core::TokenStore;

use crate::output;
use crate::store::FileTokenStore;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    let store = FileTokenStore::open_default()?;
    store.clear();

    output::success("Logged out");
    Ok(())
}
