use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The kind of named entity a failed lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
	Network,
	Account,
	Contract,
	Deployment,
}

impl fmt::Display for EntityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Self::Network => "network",
			Self::Account => "account",
			Self::Contract => "contract",
			Self::Deployment => "deployment",
		};
		f.write_str(s)
	}
}

/// Every failure the library can report.  Commands translate these into
/// exit codes and messages; the library itself never exits or panics on
/// malformed input.
#[derive(Debug, Error)]
pub enum Error {
	#[error("{kind} not found: {name}")]
	NotFound { kind: EntityKind, name: String },

	#[error("key decode failed: {0}")]
	KeyDecode(String),

	#[error("script generation failed: {0}")]
	ScriptGeneration(String),

	#[error("signing failed: {0}")]
	Signing(String),

	#[error("submission failed: {0}")]
	Submission(String),

	#[error("configuration load failed: {0}")]
	Load(String),

	#[error("could not read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl Error {
	pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
		Self::NotFound { kind, name: name.into() }
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn not_found_names_the_entity_kind() {
		let err = Error::not_found(EntityKind::Account, "service");
		assert_eq!(err.to_string(), "account not found: service");
	}

	#[test]
	fn read_error_keeps_the_path() {
		let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
		let err = Error::Read { path: "tx.script".into(), source: io };
		assert!(err.to_string().contains("tx.script"));
	}
}
