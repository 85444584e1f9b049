use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::crypto::{HashAlgorithm, SignatureAlgorithm};

#[derive(Parser)]
#[command(
	name = "ledgerkit",
	about = "Project CLI for managing accounts, contracts, and deployments across ledger networks.",
	version
)]
pub struct Cli {
	/// Path to the project manifest.
	#[arg(long, default_value = "ledger.json", global = true)]
	pub config_path: PathBuf,

	/// Network to target (defaults to the settings file).
	#[arg(long, global = true)]
	pub network: Option<String>,

	/// Override the resolved network's host address.
	#[arg(long, global = true)]
	pub host: Option<String>,

	/// Account that signs and pays (defaults to the settings file).
	#[arg(long, global = true)]
	pub signer: Option<String>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SigAlgoArg {
	EcdsaP256,
	EcdsaSecp256k1,
}

impl SigAlgoArg {
	pub fn as_algo(&self) -> SignatureAlgorithm {
		match self {
			Self::EcdsaP256 => SignatureAlgorithm::EcdsaP256,
			Self::EcdsaSecp256k1 => SignatureAlgorithm::EcdsaSecp256k1,
		}
	}
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HashAlgoArg {
	Sha2_256,
	Sha3_256,
}

impl HashAlgoArg {
	pub fn as_algo(&self) -> HashAlgorithm {
		match self {
			Self::Sha2_256 => HashAlgorithm::Sha2_256,
			Self::Sha3_256 => HashAlgorithm::Sha3_256,
		}
	}
}

#[derive(Subcommand)]
pub enum Command {
	/// Write a starter project manifest into the current directory.
	Init {
		/// Overwrite an existing manifest.
		#[arg(long)]
		force: bool,
	},

	/// Create and inspect on-chain accounts.
	Accounts {
		#[command(subcommand)]
		command: AccountsCommand,
	},

	/// Build, sign, and send transactions.
	Transactions {
		#[command(subcommand)]
		command: TransactionsCommand,
	},

	/// Generate signing keys.
	Keys {
		#[command(subcommand)]
		command: KeysCommand,
	},

	/// Inspect the project and deploy its contracts.
	Project {
		#[command(subcommand)]
		command: ProjectCommand,
	},

	/// Manage user-level CLI settings.
	Settings {
		#[command(subcommand)]
		command: SettingsCommand,
	},
}

// -- Accounts subcommands --

#[derive(Subcommand)]
pub enum AccountsCommand {
	/// Submit an account-creation transaction for the given public keys.
	Create {
		/// Hex private key for the new account; repeatable.
		#[arg(long = "key", required = true)]
		keys: Vec<String>,

		/// Signature algorithm for the supplied keys.
		#[arg(long, value_enum, default_value = "ecdsa-p256")]
		sig_algo: SigAlgoArg,

		/// Hash algorithm for the supplied keys.
		#[arg(long, value_enum, default_value = "sha3-256")]
		hash_algo: HashAlgoArg,

		/// Path to contract code to install on the new account.
		#[arg(long)]
		code: Option<PathBuf>,
	},
}

// -- Transactions subcommands --

#[derive(Subcommand)]
pub enum TransactionsCommand {
	/// Assemble, sign, and submit a transaction.
	Send {
		/// Path to the script file.  Omit for an empty script.
		#[arg(long)]
		code: Option<PathBuf>,

		/// Transaction sequence number.
		#[arg(long, default_value = "1")]
		nonce: u64,

		/// Compute limit for execution.
		#[arg(long, default_value = "10")]
		compute_limit: u64,

		/// Additional authorizing account names; repeatable.
		#[arg(long = "authorizer")]
		authorizers: Vec<String>,
	},

	/// Check the status of a submitted transaction.
	Status {
		/// Transaction hash (0x-prefixed).
		tx_hash: String,
	},
}

// -- Keys subcommands --

#[derive(Subcommand)]
pub enum KeysCommand {
	/// Generate a fresh key pair and print it.
	Generate {
		#[arg(long, value_enum, default_value = "ecdsa-p256")]
		sig_algo: SigAlgoArg,

		#[arg(long, value_enum, default_value = "sha3-256")]
		hash_algo: HashAlgoArg,
	},
}

// -- Project subcommands --

#[derive(Subcommand)]
pub enum ProjectCommand {
	/// Summarize the loaded manifest.
	Show,

	/// List contracts on the target network (global --network applies).
	Contracts,

	/// Deploy every contract declared for the target network.
	Deploy {
		/// Only deployments owned by this account.
		#[arg(long)]
		account: Option<String>,

		/// Update contracts that are already deployed.
		#[arg(long)]
		update: bool,
	},
}

// -- Settings subcommands --

#[derive(Subcommand)]
pub enum SettingsCommand {
	/// Set default network and signer.
	Set {
		#[arg(long)]
		default_network: Option<String>,

		#[arg(long)]
		default_signer: Option<String>,
	},

	/// Show current settings.
	Show,
}
