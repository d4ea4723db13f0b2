use clap::Parser;
use key_ledger::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::IssueToken(args) => cli::issue_token::run(args),
    }
}
