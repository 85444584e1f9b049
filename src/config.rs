use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::crypto::{HashAlgorithm, KeyMaterial, SignatureAlgorithm};
use crate::errors::{EntityKind, Error, Result};

/// The project manifest: four named registries describing networks,
/// accounts, contract sources, and deployments.
///
/// Loaded once per invocation and read-only afterwards; every lookup
/// borrows immutably, so a single `Config` can serve any number of
/// concurrent resolution passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub networks: Networks,
	#[serde(default)]
	pub accounts: Accounts,
	#[serde(default)]
	pub contracts: Contracts,
	#[serde(default)]
	pub deployments: Deployments,
}

// -- Entities --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
	pub name: String,
	pub host: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
	pub name: String,
	pub address: Address,
	pub key: AccountKey,
}

/// How an account's private key is stored.  The tag selects the backend;
/// new backends extend the enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AccountKey {
	/// Key material inline in the manifest as a hex string.
	Hex {
		index: u32,
		sig_algo: SignatureAlgorithm,
		hash_algo: HashAlgorithm,
		private_key: String,
	},
	/// Key material in a separate file holding a hex string.
	File {
		index: u32,
		sig_algo: SignatureAlgorithm,
		hash_algo: HashAlgorithm,
		location: PathBuf,
	},
}

impl AccountKey {
	/// Position of this key in the account's on-chain key list.
	pub fn index(&self) -> u32 {
		match self {
			Self::Hex { index, .. } | Self::File { index, .. } => *index,
		}
	}

	pub fn sig_algo(&self) -> SignatureAlgorithm {
		match self {
			Self::Hex { sig_algo, .. } | Self::File { sig_algo, .. } => *sig_algo,
		}
	}

	pub fn hash_algo(&self) -> HashAlgorithm {
		match self {
			Self::Hex { hash_algo, .. } | Self::File { hash_algo, .. } => *hash_algo,
		}
	}

	/// Resolve the backend to usable key material.  Called lazily so a
	/// manifest with an unreadable key file still loads; the failure
	/// surfaces on first signing use.
	pub fn material(&self) -> Result<KeyMaterial> {
		match self {
			Self::Hex { sig_algo, hash_algo, private_key, .. } => {
				KeyMaterial::decode_hex(*sig_algo, *hash_algo, private_key)
			}
			Self::File { sig_algo, hash_algo, location, .. } => {
				let raw = std::fs::read_to_string(location).map_err(|e| Error::Read {
					path: location.clone(),
					source: e,
				})?;
				KeyMaterial::decode_hex(*sig_algo, *hash_algo, raw.trim())
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
	pub name: String,
	/// A local source path, or the address the contract already lives at
	/// on this network.
	pub source: String,
	pub network: String,
}

impl Contract {
	/// True when `source` is a deployed address rather than a file path.
	pub fn is_remote(&self) -> bool {
		self.source.starts_with("0x")
	}
}

/// A constructor argument passed when a contract is deployed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractArgument {
	pub name: String,
	pub value: serde_json::Value,
}

/// One contract (plus constructor arguments) inside a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDeployment {
	pub name: String,
	#[serde(default)]
	pub args: Vec<ContractArgument>,
}

/// What to deploy where: a (network, account) pair plus an ordered list
/// of contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
	pub network: String,
	pub account: String,
	#[serde(default)]
	pub contracts: Vec<ContractDeployment>,
}

// -- Registries --

/// Networks, declaration-ordered, indexed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Network>", into = "Vec<Network>")]
pub struct Networks {
	entries: Vec<Network>,
	by_name: HashMap<String, usize>,
}

impl From<Vec<Network>> for Networks {
	fn from(entries: Vec<Network>) -> Self {
		let mut by_name = HashMap::with_capacity(entries.len());
		for (i, n) in entries.iter().enumerate() {
			by_name.entry(n.name.clone()).or_insert(i);
		}
		Self { entries, by_name }
	}
}

impl From<Networks> for Vec<Network> {
	fn from(networks: Networks) -> Self {
		networks.entries
	}
}

impl Networks {
	pub fn get_by_name(&self, name: &str) -> Option<&Network> {
		self.by_name.get(name).map(|&i| &self.entries[i])
	}

	pub fn iter(&self) -> impl Iterator<Item = &Network> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Accounts, declaration-ordered, indexed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Account>", into = "Vec<Account>")]
pub struct Accounts {
	entries: Vec<Account>,
	by_name: HashMap<String, usize>,
}

impl From<Vec<Account>> for Accounts {
	fn from(entries: Vec<Account>) -> Self {
		let mut by_name = HashMap::with_capacity(entries.len());
		for (i, a) in entries.iter().enumerate() {
			by_name.entry(a.name.clone()).or_insert(i);
		}
		Self { entries, by_name }
	}
}

impl From<Accounts> for Vec<Account> {
	fn from(accounts: Accounts) -> Self {
		accounts.entries
	}
}

impl Accounts {
	pub fn get_by_name(&self, name: &str) -> Option<&Account> {
		self.by_name.get(name).map(|&i| &self.entries[i])
	}

	pub fn iter(&self) -> impl Iterator<Item = &Account> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Contracts, declaration-ordered.  Identity is the (name, network) pair;
/// the same name may appear under several networks with different
/// sources, so only the pair lookup goes through the index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Contract>", into = "Vec<Contract>")]
pub struct Contracts {
	entries: Vec<Contract>,
	by_name_network: HashMap<(String, String), usize>,
}

impl From<Vec<Contract>> for Contracts {
	fn from(entries: Vec<Contract>) -> Self {
		let mut by_name_network = HashMap::with_capacity(entries.len());
		for (i, c) in entries.iter().enumerate() {
			by_name_network
				.entry((c.name.clone(), c.network.clone()))
				.or_insert(i);
		}
		Self { entries, by_name_network }
	}
}

impl From<Contracts> for Vec<Contract> {
	fn from(contracts: Contracts) -> Self {
		contracts.entries
	}
}

impl Contracts {
	/// First declared contract with this name, whatever its network.
	/// Ambiguous when the name exists on several networks; callers that
	/// know the network must use [`Contracts::get_by_name_and_network`].
	pub fn get_by_name(&self, name: &str) -> Option<&Contract> {
		self.entries.iter().find(|c| c.name == name)
	}

	/// The authoritative lookup: exact match on the (name, network) pair.
	pub fn get_by_name_and_network(&self, name: &str, network: &str) -> Option<&Contract> {
		self.by_name_network
			.get(&(name.to_owned(), network.to_owned()))
			.map(|&i| &self.entries[i])
	}

	/// Every contract on `network`, in declaration order.
	pub fn get_by_network(&self, network: &str) -> Vec<&Contract> {
		self.entries.iter().filter(|c| c.network == network).collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Contract> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Deployments, declaration-ordered.  No standalone name; filtered by
/// network and (account, network).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deployments {
	entries: Vec<Deployment>,
}

impl Deployments {
	pub fn get_by_network(&self, network: &str) -> Vec<&Deployment> {
		self.entries.iter().filter(|d| d.network == network).collect()
	}

	pub fn get_by_account_and_network(&self, account: &str, network: &str) -> Vec<&Deployment> {
		self.entries
			.iter()
			.filter(|d| d.account == account && d.network == network)
			.collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Deployment> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

// -- Loading and resolution --

impl Config {
	/// Load the project manifest from disk.
	pub fn load_file(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.map_err(|e| Error::Load(format!("{}: {e}", path.display())))?;
		Self::from_json(&content)
	}

	pub fn from_json(content: &str) -> Result<Self> {
		serde_json::from_str(content).map_err(|e| Error::Load(e.to_string()))
	}

	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string_pretty(self).map_err(|e| Error::Load(e.to_string()))
	}

	/// Write the manifest back to disk, pretty-printed.
	pub fn save(&self, path: &Path) -> Result<()> {
		let json = self.to_json()?;
		std::fs::write(path, json + "\n")
			.map_err(|e| Error::Load(format!("{}: {e}", path.display())))
	}

	pub fn network(&self, name: &str) -> Result<&Network> {
		self.networks
			.get_by_name(name)
			.ok_or_else(|| Error::not_found(EntityKind::Network, name))
	}

	pub fn account(&self, name: &str) -> Result<&Account> {
		self.accounts
			.get_by_name(name)
			.ok_or_else(|| Error::not_found(EntityKind::Account, name))
	}

	pub fn contract(&self, name: &str, network: &str) -> Result<&Contract> {
		self.contracts
			.get_by_name_and_network(name, network)
			.ok_or_else(|| {
				Error::not_found(EntityKind::Contract, format!("{name} on network {network}"))
			})
	}
}
