//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands;

/// BI-server exploration CLI.
#[derive(Parser, Debug)]
#[command(name = "birdseye")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a session (login)
    Login(commands::login::LoginArgs),

    /// Clear the stored session
    Logout(commands::logout::LogoutArgs),

    /// Display the authenticated user
    Whoami(commands::whoami::WhoamiArgs),

    /// Refresh the session tokens
    Refresh(commands::refresh::RefreshArgs),

    /// Check server health
    Health(commands::health::HealthArgs),

    /// List server resources
    Ls(commands::ls::LsArgs),

    /// Execute a SQL statement through SQL Lab
    Sql(commands::sql::SqlArgs),
}
