use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User-level CLI settings, separate from the project manifest: which
/// network to target and which account signs when no flag says
/// otherwise.  Project state (networks, accounts, contracts,
/// deployments) never lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	pub default_network: String,
	pub signer: Option<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			default_network: "emulator".into(),
			signer: None,
		}
	}
}

impl Settings {
	/// Directory where CLI state is stored (~/.ledgerkit/).
	pub fn dir() -> PathBuf {
		dirs::home_dir()
			.expect("could not determine home directory")
			.join(".ledgerkit")
	}

	/// Path to the settings file.
	pub fn path() -> PathBuf {
		Self::dir().join("config.toml")
	}

	/// Load settings from disk, falling back to defaults if no file exists.
	pub fn load() -> anyhow::Result<Self> {
		let path = Self::path();
		if path.exists() {
			let content = std::fs::read_to_string(&path)?;
			Ok(toml::from_str(&content)?)
		} else {
			Ok(Self::default())
		}
	}

	/// Persist the current settings to disk, creating the directory if needed.
	pub fn save(&self) -> anyhow::Result<()> {
		let path = Self::path();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, toml::to_string_pretty(self)?)?;
		Ok(())
	}
}
