//! Attaches signatures to assembled transactions.
//!
//! Signing is pure with respect to the key: the same key material and
//! descriptor content always produce the same signature, and nothing on
//! the key is mutated, so one key can sign any number of transactions
//! concurrently.

use crate::address::Address;
use crate::crypto::KeyMaterial;
use crate::errors::Result;
use crate::tx_builder::Transaction;

/// Sign `tx` on behalf of `address`, replacing any signature that
/// address already contributed.  Completeness is not enforced here;
/// callers check [`Transaction::is_fully_signed`] before submission.
pub fn sign(tx: &mut Transaction, address: Address, key: &KeyMaterial) -> Result<()> {
	let message = tx.signable_message();
	let signature = key.sign(&message)?;
	tx.signatures.insert(address, signature);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crypto::{HashAlgorithm, SignatureAlgorithm};
	use crate::tx_builder::build_transaction;

	const KEY_A: &str = "dd72967fd2bd75234ae9037dd4694c1f00baad63a10c35172bf65fbb8ad74b47";
	const KEY_B: &str = "388e3fbdc654b765942610679bb3a66b74212149ab9482187067ee116d9a8118";

	fn key(hex: &str) -> KeyMaterial {
		KeyMaterial::decode_hex(SignatureAlgorithm::EcdsaP256, HashAlgorithm::Sha3_256, hex)
			.unwrap()
	}

	fn addr(n: u8) -> Address {
		Address::new([0, 0, 0, 0, 0, 0, 0, n])
	}

	#[test]
	fn signing_adds_one_entry_per_address() {
		let mut tx = build_transaction(b"script".to_vec(), 1, 10, addr(1), &[addr(2)]);

		sign(&mut tx, addr(1), &key(KEY_A)).unwrap();
		assert_eq!(tx.signatures.len(), 1);

		sign(&mut tx, addr(2), &key(KEY_B)).unwrap();
		assert_eq!(tx.signatures.len(), 2);
		assert!(tx.is_fully_signed());
	}

	#[test]
	fn resigning_an_address_is_idempotent() {
		let mut tx = build_transaction(b"script".to_vec(), 1, 10, addr(1), &[addr(2)]);

		sign(&mut tx, addr(1), &key(KEY_A)).unwrap();
		sign(&mut tx, addr(2), &key(KEY_B)).unwrap();
		let first = tx.signatures[&addr(1)].clone();
		let other = tx.signatures[&addr(2)].clone();

		sign(&mut tx, addr(1), &key(KEY_A)).unwrap();
		assert_eq!(tx.signatures.len(), 2, "no duplicate entries");
		assert_eq!(tx.signatures[&addr(1)], first, "stable for the re-signed address");
		assert_eq!(tx.signatures[&addr(2)], other, "other addresses untouched");
	}

	#[test]
	fn resigning_with_a_different_key_overwrites() {
		let mut tx = build_transaction(b"script".to_vec(), 1, 10, addr(1), &[]);

		sign(&mut tx, addr(1), &key(KEY_A)).unwrap();
		let first = tx.signatures[&addr(1)].clone();

		sign(&mut tx, addr(1), &key(KEY_B)).unwrap();
		assert_eq!(tx.signatures.len(), 1);
		assert_ne!(tx.signatures[&addr(1)], first, "last writer wins");
	}

	#[test]
	fn signature_depends_on_descriptor_content() {
		let mut a = build_transaction(b"script".to_vec(), 1, 10, addr(1), &[]);
		let mut b = build_transaction(b"script".to_vec(), 2, 10, addr(1), &[]);

		sign(&mut a, addr(1), &key(KEY_A)).unwrap();
		sign(&mut b, addr(1), &key(KEY_A)).unwrap();
		assert_ne!(a.signatures[&addr(1)], b.signatures[&addr(1)]);
	}
}
