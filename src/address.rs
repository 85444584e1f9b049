use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An 8-byte on-chain account address.
///
/// Parsed from hex with an optional `0x` prefix.  Shorter strings are
/// left-padded with zero bytes, matching how the ledger renders short
/// addresses.  Display is always the full 16 lowercase hex characters.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 8]);

#[derive(Debug, thiserror::Error)]
#[error("invalid address {input:?}: {reason}")]
pub struct ParseAddressError {
	input: String,
	reason: String,
}

impl Address {
	pub const LENGTH: usize = 8;

	pub fn new(bytes: [u8; 8]) -> Self {
		Self(bytes)
	}

	pub fn from_hex(s: &str) -> Result<Self, ParseAddressError> {
		let clean = s.strip_prefix("0x").unwrap_or(s);
		let bytes = hex::decode(clean).map_err(|e| ParseAddressError {
			input: s.to_owned(),
			reason: e.to_string(),
		})?;
		if bytes.len() > Self::LENGTH {
			return Err(ParseAddressError {
				input: s.to_owned(),
				reason: format!("expected at most {} bytes, got {}", Self::LENGTH, bytes.len()),
			});
		}
		let mut out = [0u8; Self::LENGTH];
		out[Self::LENGTH - bytes.len()..].copy_from_slice(&bytes);
		Ok(Self(out))
	}

	pub fn as_bytes(&self) -> &[u8; 8] {
		&self.0
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&hex::encode(self.0))
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Address({})", hex::encode(self.0))
	}
}

impl FromStr for Address {
	type Err = ParseAddressError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_hex(s)
	}
}

impl Serialize for Address {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(D::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_with_and_without_prefix() {
		let a = Address::from_hex("f8d6e0586b0a20c7").unwrap();
		let b = Address::from_hex("0xf8d6e0586b0a20c7").unwrap();
		assert_eq!(a, b);
		assert_eq!(a.to_string(), "f8d6e0586b0a20c7");
	}

	#[test]
	fn short_input_is_left_padded() {
		let a = Address::from_hex("0x01").unwrap();
		assert_eq!(a.to_string(), "0000000000000001");
		assert_eq!(a.as_bytes()[7], 1);
	}

	#[test]
	fn rejects_garbage_and_overlong_input() {
		assert!(Address::from_hex("zz").is_err());
		assert!(Address::from_hex("f8d6e0586b0a20c7ff").is_err());
	}

	#[test]
	fn serde_uses_the_hex_string_form() {
		let a = Address::from_hex("0x02").unwrap();
		let json = serde_json::to_string(&a).unwrap();
		assert_eq!(json, "\"0000000000000002\"");
		let back: Address = serde_json::from_str(&json).unwrap();
		assert_eq!(back, a);
	}
}
