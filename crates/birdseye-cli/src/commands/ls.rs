//! Resource listing command implementation.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::output;
use crate::store;

#[derive(Args, Debug)]
pub struct LsArgs {
    #[command(subcommand)]
    pub resource: Resource,
}

#[derive(Subcommand, Debug)]
pub enum Resource {
    /// List dashboards
    Dashboards,
    /// List charts
    Charts,
    /// List datasets
    Datasets,
    /// List databases
    Databases,
}

pub async fn run(args: LsArgs) -> Result<()> {
    let client = store::open_client()?;

    let (label, items) = match args.resource {
        Resource::Dashboards => ("dashboards", client.dashboards().await),
        Resource::Charts => ("charts", client.charts().await),
        Resource::Datasets => ("datasets", client.datasets().await),
        Resource::Databases => ("databases", client.databases().await),
    };
    let items = items.with_context(|| format!("Failed to list {label}"))?;

    output::field(label, &items.len().to_string());
    output::json_pretty(&items)?;

    Ok(())
}
