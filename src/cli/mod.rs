//! CLI module for Key Ledger
//!
//! - `serve`: run the HTTP API
//! - `issue-token`: mint a development JWT signed with the configured secret

pub mod issue_token;
pub mod serve;

use clap::{Parser, Subcommand};

/// Key Ledger - API keys with token balances
#[derive(Parser)]
#[command(name = "key-ledger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Print a signed JWT for local testing
    IssueToken(issue_token::IssueTokenArgs),
}
