//! Subcommand implementations.

pub mod health;
pub mod login;
pub mod logout;
pub mod ls;
pub mod refresh;
pub mod sql;
pub mod whoami;
