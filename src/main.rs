use anyhow::Result;
use clap::Parser;

use ledgerkit::cli::{Cli, Command};
use ledgerkit::commands;

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	match &cli.command {
		Command::Init { force } => commands::project::init(&cli, *force),
		Command::Accounts { command } => commands::accounts::run(&cli, command).await,
		Command::Transactions { command } => commands::transactions::run(&cli, command).await,
		Command::Keys { command } => commands::keys::run(command),
		Command::Project { command } => commands::project::run(&cli, command).await,
		Command::Settings { command } => commands::settings::run(command),
	}
}
