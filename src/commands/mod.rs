pub mod accounts;
pub mod keys;
pub mod project;
pub mod settings;
pub mod transactions;

use std::path::Path;

use anyhow::Result;

use crate::cli::Cli;
use crate::config::{Account, Config};
use crate::crypto::KeyMaterial;
use crate::errors::Error;
use crate::settings::Settings;

/// Load the project manifest named on the command line.
pub fn load_project(cli: &Cli) -> Result<Config> {
	if !cli.config_path.exists() {
		anyhow::bail!(
			"no project manifest at {}. Run: ledgerkit init",
			cli.config_path.display()
		);
	}
	Ok(Config::load_file(&cli.config_path)?)
}

/// Resolve the host to submit against: an explicit --host wins,
/// otherwise the named network's host from the manifest.
pub fn resolve_host(cli: &Cli, settings: &Settings, config: &Config) -> Result<String> {
	if let Some(host) = &cli.host {
		return Ok(host.clone());
	}
	let name = cli.network.as_deref().unwrap_or(&settings.default_network);
	Ok(config.network(name)?.host.clone())
}

/// Resolve the signing account from CLI flag or settings, failing with
/// a remedial hint if neither names one.
pub fn resolve_signer<'a>(
	cli: &Cli,
	settings: &Settings,
	config: &'a Config,
) -> Result<(&'a Account, KeyMaterial)> {
	let name = cli
		.signer
		.as_deref()
		.or(settings.signer.as_deref())
		.ok_or_else(|| {
			anyhow::anyhow!(
				"no signer account given. Pass --signer or run: ledgerkit settings set --default-signer <name>"
			)
		})?;
	let account = config.account(name)?;
	let key = account.key.material()?;
	Ok((account, key))
}

/// Read a script file, mapping I/O failure to a typed read error.
pub fn read_script(path: &Path) -> Result<Vec<u8>, Error> {
	std::fs::read(path).map_err(|e| Error::Read { path: path.to_owned(), source: e })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::address::Address;
	use crate::config::{AccountKey, Network};
	use crate::crypto::{HashAlgorithm, SignatureAlgorithm};

	use clap::Parser;

	fn parse(args: &[&str]) -> Cli {
		Cli::try_parse_from(args).unwrap()
	}

	fn project() -> Config {
		Config {
			networks: vec![
				Network { name: "emulator".into(), host: "127.0.0.1:3569".into() },
				Network { name: "testnet".into(), host: "access.testnet.example.org:9000".into() },
			]
			.into(),
			accounts: vec![Account {
				name: "service".into(),
				address: Address::from_hex("f8d6e0586b0a20c7").unwrap(),
				key: AccountKey::Hex {
					index: 0,
					sig_algo: SignatureAlgorithm::EcdsaP256,
					hash_algo: HashAlgorithm::Sha3_256,
					private_key:
						"dd72967fd2bd75234ae9037dd4694c1f00baad63a10c35172bf65fbb8ad74b47".into(),
				},
			}]
			.into(),
			..Config::default()
		}
	}

	#[test]
	fn host_flag_beats_the_network_lookup() {
		let cli = parse(&["ledgerkit", "--host", "10.0.0.1:9000", "project", "show"]);
		let host = resolve_host(&cli, &Settings::default(), &project()).unwrap();
		assert_eq!(host, "10.0.0.1:9000");
	}

	#[test]
	fn network_flag_beats_the_settings_default() {
		let cli = parse(&["ledgerkit", "--network", "testnet", "project", "show"]);
		let host = resolve_host(&cli, &Settings::default(), &project()).unwrap();
		assert_eq!(host, "access.testnet.example.org:9000");

		let cli = parse(&["ledgerkit", "project", "show"]);
		let host = resolve_host(&cli, &Settings::default(), &project()).unwrap();
		assert_eq!(host, "127.0.0.1:3569", "settings default network");
	}

	#[test]
	fn unknown_network_is_a_typed_miss() {
		let cli = parse(&["ledgerkit", "--network", "mainnet", "project", "show"]);
		let err = resolve_host(&cli, &Settings::default(), &project()).unwrap_err();
		assert_eq!(err.to_string(), "network not found: mainnet");
	}

	#[test]
	fn signer_resolution_prefers_the_flag() {
		let cli = parse(&["ledgerkit", "--signer", "service", "project", "show"]);
		let config = project();
		let (account, key) = resolve_signer(&cli, &Settings::default(), &config).unwrap();
		assert_eq!(account.name, "service");
		assert_eq!(key.sig_algo(), SignatureAlgorithm::EcdsaP256);
	}

	#[test]
	fn signer_resolution_falls_back_to_settings_then_fails() {
		let cli = parse(&["ledgerkit", "project", "show"]);
		let mut settings = Settings::default();

		let err = resolve_signer(&cli, &settings, &project()).unwrap_err();
		assert!(err.to_string().contains("no signer account given"));

		settings.signer = Some("service".into());
		assert!(resolve_signer(&cli, &settings, &project()).is_ok());

		settings.signer = Some("ghost".into());
		let err = resolve_signer(&cli, &settings, &project()).unwrap_err();
		assert_eq!(err.to_string(), "account not found: ghost");
	}

	#[test]
	fn read_script_reports_the_missing_path() {
		let err = read_script(Path::new("does/not/exist.script")).unwrap_err();
		assert!(matches!(err, Error::Read { .. }));
	}
}
