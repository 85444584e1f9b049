use anyhow::Result;

use crate::cli::{AccountsCommand, Cli, HashAlgoArg, SigAlgoArg};
use crate::commands::{load_project, read_script, resolve_host, resolve_signer};
use crate::crypto::{KeyMaterial, ACCOUNT_KEY_WEIGHT_THRESHOLD};
use crate::rpc::{HttpLedgerClient, LedgerClient};
use crate::settings::Settings;
use crate::signer;
use crate::tx_builder::{build_create_account, TxParams};

pub async fn run(cli: &Cli, cmd: &AccountsCommand) -> Result<()> {
	match cmd {
		AccountsCommand::Create { keys, sig_algo, hash_algo, code } => {
			create(cli, keys, *sig_algo, *hash_algo, code.as_deref()).await
		}
	}
}

async fn create(
	cli: &Cli,
	keys: &[String],
	sig_algo: SigAlgoArg,
	hash_algo: HashAlgoArg,
	code: Option<&std::path::Path>,
) -> Result<()> {
	let settings = Settings::load()?;
	let config = load_project(cli)?;
	let (payer, payer_key) = resolve_signer(cli, &settings, &config)?;

	// Each --key is the new account's private key; only the derived
	// public half goes on-chain.
	let mut account_keys = Vec::with_capacity(keys.len());
	for hex_key in keys {
		let material = KeyMaterial::decode_hex(sig_algo.as_algo(), hash_algo.as_algo(), hex_key)?;
		account_keys.push(material.account_key(ACCOUNT_KEY_WEIGHT_THRESHOLD));
	}

	let code_bytes = match code {
		Some(path) => Some(read_script(path)?),
		None => None,
	};

	let mut tx = build_create_account(
		payer.address,
		&account_keys,
		code_bytes.as_deref(),
		TxParams::default(),
	)?;
	signer::sign(&mut tx, payer.address, &payer_key)?;

	let host = resolve_host(cli, &settings, &config)?;
	let client = HttpLedgerClient::new(&host);
	let receipt = client.submit(&tx).await?;

	println!("Account creation submitted.");
	println!("Payer: {} ({})", payer.name, payer.address);
	println!("Keys:  {}", account_keys.len());
	println!("TX:    {}", receipt.tx_hash);

	Ok(())
}
