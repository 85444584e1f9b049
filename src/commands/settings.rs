use anyhow::Result;

use crate::cli::SettingsCommand;
use crate::settings::Settings;

pub fn run(cmd: &SettingsCommand) -> Result<()> {
	match cmd {
		SettingsCommand::Set { default_network, default_signer } => {
			set(default_network.as_deref(), default_signer.as_deref())
		}
		SettingsCommand::Show => show(),
	}
}

fn set(default_network: Option<&str>, default_signer: Option<&str>) -> Result<()> {
	if default_network.is_none() && default_signer.is_none() {
		anyhow::bail!("nothing to set. Pass --default-network and/or --default-signer.");
	}

	let mut settings = Settings::load()?;
	if let Some(network) = default_network {
		settings.default_network = network.to_owned();
	}
	if let Some(signer) = default_signer {
		settings.signer = Some(signer.to_owned());
	}
	settings.save()?;

	println!("Settings saved to {}", Settings::path().display());
	Ok(())
}

fn show() -> Result<()> {
	let settings = Settings::load()?;

	println!("Settings");
	println!("  Network: {}", settings.default_network);
	println!("  Signer:  {}", settings.signer.as_deref().unwrap_or("not set"));
	Ok(())
}
