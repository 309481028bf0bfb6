//! SQL execution command implementation.

use anyhow::{Context, Result};
use clap::Args;

use birdseye_client::SqlExecuteRequest;

use crate::output;
use crate::store;

#[derive(Args, Debug)]
pub struct SqlArgs {
    /// Database id to run against
    #[arg(long)]
    pub database_id: i64,

    /// SQL statement to execute
    pub sql: String,

    /// Schema to run in
    #[arg(long)]
    pub schema: Option<String>,

    /// Row limit
    #[arg(long)]
    pub limit: Option<u32>,
}

pub async fn run(args: SqlArgs) -> Result<()> {
    let client = store::open_client()?;

    let mut request = SqlExecuteRequest::new(args.database_id, &args.sql);
    request.schema = args.schema;
    request.limit = args.limit;

    let result = client
        .execute_sql(&request)
        .await
        .context("SQL execution failed")?;

    output::json_pretty(&result)?;
    Ok(())
}
