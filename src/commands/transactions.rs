use anyhow::Result;

use crate::cli::{Cli, TransactionsCommand};
use crate::commands::{load_project, read_script, resolve_host, resolve_signer};
use crate::rpc::{HttpLedgerClient, LedgerClient};
use crate::settings::Settings;
use crate::signer;
use crate::tx_builder::build_transaction;

pub async fn run(cli: &Cli, cmd: &TransactionsCommand) -> Result<()> {
	match cmd {
		TransactionsCommand::Send { code, nonce, compute_limit, authorizers } => {
			send(cli, code.as_deref(), *nonce, *compute_limit, authorizers).await
		}
		TransactionsCommand::Status { tx_hash } => status(cli, tx_hash).await,
	}
}

async fn send(
	cli: &Cli,
	code: Option<&std::path::Path>,
	nonce: u64,
	compute_limit: u64,
	authorizers: &[String],
) -> Result<()> {
	let settings = Settings::load()?;
	let config = load_project(cli)?;
	let (payer, payer_key) = resolve_signer(cli, &settings, &config)?;

	let script = match code {
		Some(path) => read_script(path)?,
		None => Vec::new(),
	};

	// The signer always authorizes; extra authorizers are resolved by
	// account name and must each sign before submission.
	let mut authorizer_accounts = vec![payer];
	for name in authorizers {
		authorizer_accounts.push(config.account(name)?);
	}
	let addresses: Vec<_> = authorizer_accounts.iter().map(|a| a.address).collect();

	let mut tx = build_transaction(script, nonce, compute_limit, payer.address, &addresses);
	for account in &authorizer_accounts {
		let key = account.key.material()?;
		signer::sign(&mut tx, account.address, &key)?;
	}
	debug_assert!(tx.is_fully_signed());

	let host = resolve_host(cli, &settings, &config)?;
	let client = HttpLedgerClient::new(&host);
	let receipt = client.submit(&tx).await?;

	println!("Transaction submitted.");
	println!("Nonce: {nonce}");
	println!("TX:    {}", receipt.tx_hash);

	Ok(())
}

async fn status(cli: &Cli, tx_hash: &str) -> Result<()> {
	let settings = Settings::load()?;
	let config = load_project(cli)?;
	let host = resolve_host(cli, &settings, &config)?;
	let client = HttpLedgerClient::new(&host);

	match client.transaction_status(tx_hash).await? {
		Some(info) => {
			println!("Transaction: {tx_hash}");
			println!("Status:      {}", info.get("status").unwrap_or(&info));
		}
		None => println!("Transaction not found: {tx_hash}"),
	}
	Ok(())
}
