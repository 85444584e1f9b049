use anyhow::Result;

use crate::address::Address;
use crate::cli::{Cli, ProjectCommand};
use crate::commands::{load_project, read_script, resolve_host};
use crate::config::{Account, AccountKey, Config, Network};
use crate::crypto::{HashAlgorithm, KeyMaterial, SignatureAlgorithm};
use crate::rpc::{HttpLedgerClient, LedgerClient};
use crate::settings::Settings;
use crate::signer;
use crate::templates;
use crate::tx_builder::{build_transaction, TxParams};

pub async fn run(cli: &Cli, cmd: &ProjectCommand) -> Result<()> {
	match cmd {
		ProjectCommand::Show => show(cli),
		ProjectCommand::Contracts => contracts(cli),
		ProjectCommand::Deploy { account, update } => {
			deploy(cli, account.as_deref(), *update).await
		}
	}
}

/// Write a starter manifest: one emulator network and a service account
/// with a freshly generated key.
pub fn init(cli: &Cli, force: bool) -> Result<()> {
	if cli.config_path.exists() && !force {
		anyhow::bail!(
			"{} already exists. Pass --force to overwrite it.",
			cli.config_path.display()
		);
	}

	let service_key =
		KeyMaterial::generate(SignatureAlgorithm::EcdsaP256, HashAlgorithm::Sha3_256);
	let config = Config {
		networks: vec![Network { name: "emulator".into(), host: "127.0.0.1:3569".into() }].into(),
		accounts: vec![Account {
			name: "service".into(),
			address: Address::new([0, 0, 0, 0, 0, 0, 0, 1]),
			key: AccountKey::Hex {
				index: 0,
				sig_algo: service_key.sig_algo(),
				hash_algo: service_key.hash_algo(),
				private_key: service_key.private_key_hex(),
			},
		}]
		.into(),
		..Config::default()
	};
	config.save(&cli.config_path)?;

	println!("Project manifest written to {}", cli.config_path.display());
	println!("Service account key generated; keep the manifest private.");
	Ok(())
}

fn show(cli: &Cli) -> Result<()> {
	let config = load_project(cli)?;

	println!("Project {}", cli.config_path.display());
	println!("  Networks:    {}", config.networks.len());
	for n in config.networks.iter() {
		println!("    {} ({})", n.name, n.host);
	}
	println!("  Accounts:    {}", config.accounts.len());
	for a in config.accounts.iter() {
		println!("    {} ({})", a.name, a.address);
	}
	println!("  Contracts:   {}", config.contracts.len());
	println!("  Deployments: {}", config.deployments.len());
	for d in config.deployments.iter() {
		let names: Vec<&str> = d.contracts.iter().map(|c| c.name.as_str()).collect();
		println!("    {} on {}: [{}]", d.account, d.network, names.join(", "));
	}
	Ok(())
}

fn contracts(cli: &Cli) -> Result<()> {
	let settings = Settings::load()?;
	let config = load_project(cli)?;

	let network = cli.network.as_deref().unwrap_or(&settings.default_network);
	let on_network = config.contracts.get_by_network(network);

	if on_network.is_empty() {
		println!("No contracts declared for network {network}.");
		return Ok(());
	}
	println!("Contracts on {network}:");
	for c in on_network {
		let kind = if c.is_remote() { "deployed at" } else { "source" };
		println!("  {} ({kind} {})", c.name, c.source);
	}
	Ok(())
}

/// Deploy every contract declared for the target network, one signed
/// transaction per deployment entry.
async fn deploy(cli: &Cli, account_filter: Option<&str>, update: bool) -> Result<()> {
	let settings = Settings::load()?;
	let config = load_project(cli)?;

	let network = cli.network.as_deref().unwrap_or(&settings.default_network);
	config.network(network)?;

	let deployments = match account_filter {
		Some(account) => config.deployments.get_by_account_and_network(account, network),
		None => config.deployments.get_by_network(network),
	};
	if deployments.is_empty() {
		println!("Nothing to deploy on {network}.");
		return Ok(());
	}

	let host = resolve_host(cli, &settings, &config)?;
	let client = HttpLedgerClient::new(&host);

	for deployment in deployments {
		let account = config.account(&deployment.account)?;
		let key = account.key.material()?;

		for contract_deployment in &deployment.contracts {
			// Contract references must resolve on the deployment's own
			// network.
			let contract = config.contract(&contract_deployment.name, &deployment.network)?;
			if contract.is_remote() {
				println!(
					"Skipping {}: already deployed at {} on {network}.",
					contract.name, contract.source
				);
				continue;
			}

			let code = read_script(std::path::Path::new(&contract.source))?;
			let script = templates::deploy_contract(
				&contract.name,
				&code,
				&contract_deployment.args,
				update,
			)?;

			let params = TxParams::default();
			let mut tx = build_transaction(
				script,
				params.nonce,
				params.compute_limit,
				account.address,
				&[account.address],
			);
			signer::sign(&mut tx, account.address, &key)?;

			let receipt = client.submit(&tx).await?;
			println!("Deployed {} with {} ({})", contract.name, account.name, receipt.tx_hash);
		}
	}

	Ok(())
}
