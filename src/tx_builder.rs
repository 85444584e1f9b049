use std::collections::BTreeMap;

use crate::address::Address;
use crate::crypto::AccountPublicKey;
use crate::errors::Result;
use crate::templates;

/// Domain separation prefix for transaction signatures, zero-padded to
/// 32 bytes so signed payloads can never collide with other message
/// kinds.
const TRANSACTION_DOMAIN_TAG: &str = "LEDGERKIT-V0.0-transaction";

/// Nonce and compute limit applied to generated transactions unless the
/// caller overrides them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxParams {
	pub nonce: u64,
	pub compute_limit: u64,
}

impl Default for TxParams {
	fn default() -> Self {
		Self { nonce: 1, compute_limit: 10 }
	}
}

/// An assembled transaction: script, execution parameters, the accounts
/// involved, and the signatures collected so far.
///
/// Signatures are keyed by address; signing the same address again
/// replaces the previous entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
	pub script: Vec<u8>,
	pub nonce: u64,
	pub compute_limit: u64,
	pub payer: Address,
	pub authorizers: Vec<Address>,
	pub signatures: BTreeMap<Address, Vec<u8>>,
}

impl Transaction {
	/// Append an authorizer, keeping the list an ordered set.
	pub fn add_authorizer(&mut self, address: Address) {
		if !self.authorizers.contains(&address) {
			self.authorizers.push(address);
		}
	}

	/// The canonical byte encoding covered by every signature: domain
	/// tag, integer fields big-endian, script length-prefixed, then the
	/// payer and authorizer list.  Signatures themselves are not part of
	/// the message, so signing never invalidates prior signatures.
	pub fn signable_message(&self) -> Vec<u8> {
		let mut msg = Vec::with_capacity(64 + self.script.len());
		msg.extend_from_slice(&padded_tag(TRANSACTION_DOMAIN_TAG));
		msg.extend_from_slice(&self.nonce.to_be_bytes());
		msg.extend_from_slice(&self.compute_limit.to_be_bytes());
		msg.extend_from_slice(self.payer.as_bytes());
		msg.extend_from_slice(&(self.script.len() as u32).to_be_bytes());
		msg.extend_from_slice(&self.script);
		msg.extend_from_slice(&(self.authorizers.len() as u32).to_be_bytes());
		for a in &self.authorizers {
			msg.extend_from_slice(a.as_bytes());
		}
		msg
	}

	/// True once the payer and every authorizer have a signature entry.
	/// Callers check this before submission; signing itself never
	/// enforces completeness.
	pub fn is_fully_signed(&self) -> bool {
		self.signatures.contains_key(&self.payer)
			&& self.authorizers.iter().all(|a| self.signatures.contains_key(a))
	}
}

/// Assemble a generic unsigned transaction.
///
/// An empty script is permitted; whether that is meaningful is caller
/// policy.  Duplicate authorizers collapse to one entry, first
/// occurrence wins the position.
pub fn build_transaction(
	script: Vec<u8>,
	nonce: u64,
	compute_limit: u64,
	payer: Address,
	authorizers: &[Address],
) -> Transaction {
	let mut tx = Transaction {
		script,
		nonce,
		compute_limit,
		payer,
		authorizers: Vec::with_capacity(authorizers.len()),
		signatures: BTreeMap::new(),
	};
	for &a in authorizers {
		tx.add_authorizer(a);
	}
	tx
}

/// Assemble an unsigned account-creation transaction: generate the
/// script from the new account's public keys (and optional contract
/// code), then apply the default parameter policy unless overridden.
pub fn build_create_account(
	payer: Address,
	keys: &[AccountPublicKey],
	code: Option<&[u8]>,
	params: TxParams,
) -> Result<Transaction> {
	let script = templates::create_account(keys, code)?;
	Ok(build_transaction(script, params.nonce, params.compute_limit, payer, &[]))
}

fn padded_tag(tag: &str) -> [u8; 32] {
	let mut out = [0u8; 32];
	let bytes = tag.as_bytes();
	out[..bytes.len()].copy_from_slice(bytes);
	out
}
