use std::fmt;

use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{Error, Result};

/// Weight assigned to every key attached by an account-creation
/// transaction.  An account authorizes an action once the cumulative
/// weight of its signing keys reaches this value, so a single default
/// key is sufficient on its own.
pub const ACCOUNT_KEY_WEIGHT_THRESHOLD: u32 = 1000;

// -- Algorithms --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
	#[serde(rename = "ECDSA_P256")]
	EcdsaP256,
	#[serde(rename = "ECDSA_secp256k1")]
	EcdsaSecp256k1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgorithm {
	#[serde(rename = "SHA2_256")]
	Sha2_256,
	#[serde(rename = "SHA3_256")]
	Sha3_256,
}

impl SignatureAlgorithm {
	/// Stable wire code used when encoding public keys into scripts.
	fn code(&self) -> u8 {
		match self {
			Self::EcdsaP256 => 2,
			Self::EcdsaSecp256k1 => 3,
		}
	}
}

impl HashAlgorithm {
	fn code(&self) -> u8 {
		match self {
			Self::Sha2_256 => 1,
			Self::Sha3_256 => 3,
		}
	}

	/// Digest `data` with this algorithm.  Both choices produce 32 bytes.
	pub fn digest(&self, data: &[u8]) -> [u8; 32] {
		match self {
			Self::Sha2_256 => Sha256::digest(data).into(),
			Self::Sha3_256 => sha3::Sha3_256::digest(data).into(),
		}
	}
}

impl fmt::Display for SignatureAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Self::EcdsaP256 => "ECDSA_P256",
			Self::EcdsaSecp256k1 => "ECDSA_secp256k1",
		};
		f.write_str(s)
	}
}

impl fmt::Display for HashAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Self::Sha2_256 => "SHA2_256",
			Self::Sha3_256 => "SHA3_256",
		};
		f.write_str(s)
	}
}

// -- Key material --

enum SigningHandle {
	EcdsaP256(p256::ecdsa::SigningKey),
	EcdsaSecp256k1(k256::ecdsa::SigningKey),
}

/// A private signing key together with the hash algorithm declared for it.
///
/// Constructed from a storage backend at load time (or lazily on first
/// use) and never persisted back.  Signing borrows immutably, so one key
/// can serve any number of concurrent signing calls.
pub struct KeyMaterial {
	private: SigningHandle,
	hash_algo: HashAlgorithm,
}

impl KeyMaterial {
	/// Decode a raw hex private key for the given algorithm pair.
	pub fn decode_hex(
		sig_algo: SignatureAlgorithm,
		hash_algo: HashAlgorithm,
		hex_key: &str,
	) -> Result<Self> {
		let clean = hex_key.strip_prefix("0x").unwrap_or(hex_key);
		let bytes = hex::decode(clean).map_err(|e| Error::KeyDecode(e.to_string()))?;
		let private = match sig_algo {
			SignatureAlgorithm::EcdsaP256 => SigningHandle::EcdsaP256(
				p256::ecdsa::SigningKey::from_slice(&bytes)
					.map_err(|e| Error::KeyDecode(e.to_string()))?,
			),
			SignatureAlgorithm::EcdsaSecp256k1 => SigningHandle::EcdsaSecp256k1(
				k256::ecdsa::SigningKey::from_slice(&bytes)
					.map_err(|e| Error::KeyDecode(e.to_string()))?,
			),
		};
		Ok(Self { private, hash_algo })
	}

	/// Generate a fresh random key for the given algorithm pair.
	pub fn generate(sig_algo: SignatureAlgorithm, hash_algo: HashAlgorithm) -> Self {
		let private = match sig_algo {
			SignatureAlgorithm::EcdsaP256 => {
				SigningHandle::EcdsaP256(p256::ecdsa::SigningKey::random(&mut OsRng))
			}
			SignatureAlgorithm::EcdsaSecp256k1 => {
				SigningHandle::EcdsaSecp256k1(k256::ecdsa::SigningKey::random(&mut OsRng))
			}
		};
		Self { private, hash_algo }
	}

	pub fn sig_algo(&self) -> SignatureAlgorithm {
		match &self.private {
			SigningHandle::EcdsaP256(_) => SignatureAlgorithm::EcdsaP256,
			SigningHandle::EcdsaSecp256k1(_) => SignatureAlgorithm::EcdsaSecp256k1,
		}
	}

	pub fn hash_algo(&self) -> HashAlgorithm {
		self.hash_algo
	}

	/// The raw private scalar as lowercase hex.
	pub fn private_key_hex(&self) -> String {
		match &self.private {
			SigningHandle::EcdsaP256(k) => hex::encode(k.to_bytes()),
			SigningHandle::EcdsaSecp256k1(k) => hex::encode(k.to_bytes()),
		}
	}

	/// The public key in SEC1 uncompressed form (65 bytes, `0x04` tag).
	pub fn public_key(&self) -> Vec<u8> {
		match &self.private {
			SigningHandle::EcdsaP256(k) => {
				k.verifying_key().to_encoded_point(false).as_bytes().to_vec()
			}
			SigningHandle::EcdsaSecp256k1(k) => {
				k.verifying_key().to_encoded_point(false).as_bytes().to_vec()
			}
		}
	}

	/// Digest `message` with the declared hash algorithm, then sign the
	/// digest.  RFC 6979 nonce derivation makes the output deterministic
	/// for a given key and message.
	pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
		use p256::ecdsa::signature::hazmat::PrehashSigner;

		let digest = self.hash_algo.digest(message);
		match &self.private {
			SigningHandle::EcdsaP256(k) => {
				let sig: p256::ecdsa::Signature =
					k.sign_prehash(&digest).map_err(|e| Error::Signing(e.to_string()))?;
				Ok(sig.to_bytes().to_vec())
			}
			SigningHandle::EcdsaSecp256k1(k) => {
				let sig: k256::ecdsa::Signature =
					k.sign_prehash(&digest).map_err(|e| Error::Signing(e.to_string()))?;
				Ok(sig.to_bytes().to_vec())
			}
		}
	}

	/// Derive the public half annotated with a weight, as it appears in
	/// account-creation scripts.
	pub fn account_key(&self, weight: u32) -> AccountPublicKey {
		AccountPublicKey {
			public_key: self.public_key(),
			sig_algo: self.sig_algo(),
			hash_algo: self.hash_algo,
			weight,
		}
	}
}

impl fmt::Debug for KeyMaterial {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Never print private material.
		f.debug_struct("KeyMaterial")
			.field("sig_algo", &self.sig_algo())
			.field("hash_algo", &self.hash_algo)
			.finish_non_exhaustive()
	}
}

// -- Account public keys --

/// A weighted public key ready to be attached to a new on-chain account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPublicKey {
	pub public_key: Vec<u8>,
	pub sig_algo: SignatureAlgorithm,
	pub hash_algo: HashAlgorithm,
	pub weight: u32,
}

impl AccountPublicKey {
	/// Deterministic byte encoding embedded in create-account scripts:
	/// `public_key || sig_algo code || hash_algo code || weight (u32 BE)`.
	pub fn encode(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.public_key.len() + 6);
		out.extend_from_slice(&self.public_key);
		out.push(self.sig_algo.code());
		out.push(self.hash_algo.code());
		out.extend_from_slice(&self.weight.to_be_bytes());
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const KEY_HEX: &str = "dd72967fd2bd75234ae9037dd4694c1f00baad63a10c35172bf65fbb8ad74b47";

	#[test]
	fn decodes_a_valid_hex_key() {
		let key = KeyMaterial::decode_hex(
			SignatureAlgorithm::EcdsaP256,
			HashAlgorithm::Sha3_256,
			KEY_HEX,
		)
		.unwrap();
		assert_eq!(key.sig_algo(), SignatureAlgorithm::EcdsaP256);
		assert_eq!(key.private_key_hex(), KEY_HEX);
	}

	#[test]
	fn malformed_hex_is_an_error_not_a_panic() {
		let err = KeyMaterial::decode_hex(
			SignatureAlgorithm::EcdsaP256,
			HashAlgorithm::Sha3_256,
			"not-hex-at-all",
		)
		.unwrap_err();
		assert!(matches!(err, Error::KeyDecode(_)));

		// Valid hex but the wrong length for a scalar.
		let err = KeyMaterial::decode_hex(
			SignatureAlgorithm::EcdsaSecp256k1,
			HashAlgorithm::Sha2_256,
			"deadbeef",
		)
		.unwrap_err();
		assert!(matches!(err, Error::KeyDecode(_)));
	}

	#[test]
	fn public_key_is_sec1_uncompressed() {
		let key = KeyMaterial::decode_hex(
			SignatureAlgorithm::EcdsaP256,
			HashAlgorithm::Sha3_256,
			KEY_HEX,
		)
		.unwrap();
		let pk = key.public_key();
		assert_eq!(pk.len(), 65);
		assert_eq!(pk[0], 0x04);
	}

	#[test]
	fn signing_is_deterministic() {
		let key = KeyMaterial::decode_hex(
			SignatureAlgorithm::EcdsaP256,
			HashAlgorithm::Sha3_256,
			KEY_HEX,
		)
		.unwrap();
		let a = key.sign(b"message").unwrap();
		let b = key.sign(b"message").unwrap();
		assert_eq!(a, b);
		assert_eq!(a.len(), 64);
		assert_ne!(a, key.sign(b"other message").unwrap());
	}

	#[test]
	fn hash_algorithm_changes_the_signature() {
		let sha2 = KeyMaterial::decode_hex(
			SignatureAlgorithm::EcdsaP256,
			HashAlgorithm::Sha2_256,
			KEY_HEX,
		)
		.unwrap();
		let sha3 = KeyMaterial::decode_hex(
			SignatureAlgorithm::EcdsaP256,
			HashAlgorithm::Sha3_256,
			KEY_HEX,
		)
		.unwrap();
		assert_ne!(sha2.sign(b"message").unwrap(), sha3.sign(b"message").unwrap());
	}

	#[test]
	fn generated_keys_are_distinct() {
		let a = KeyMaterial::generate(SignatureAlgorithm::EcdsaP256, HashAlgorithm::Sha3_256);
		let b = KeyMaterial::generate(SignatureAlgorithm::EcdsaP256, HashAlgorithm::Sha3_256);
		assert_ne!(a.private_key_hex(), b.private_key_hex());
	}

	#[test]
	fn account_key_encoding_carries_weight_and_codes() {
		let key = KeyMaterial::decode_hex(
			SignatureAlgorithm::EcdsaP256,
			HashAlgorithm::Sha3_256,
			KEY_HEX,
		)
		.unwrap();
		let apk = key.account_key(ACCOUNT_KEY_WEIGHT_THRESHOLD);
		let encoded = apk.encode();
		assert_eq!(encoded.len(), 65 + 2 + 4);
		assert_eq!(&encoded[..65], apk.public_key.as_slice());
		assert_eq!(encoded[65], 2, "sig algo code");
		assert_eq!(encoded[66], 3, "hash algo code");
		assert_eq!(&encoded[67..], &1000u32.to_be_bytes());
	}
}
