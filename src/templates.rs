//! Script templates for the specialized transactions the CLI can
//! assemble.  The ledger executes the script text; this module only
//! guarantees the generated bytes are well-formed and deterministic.

use crate::config::ContractArgument;
use crate::crypto::AccountPublicKey;
use crate::errors::{Error, Result};

/// Generate the script for an account-creation transaction.
///
/// Each public key is embedded in its deterministic hex encoding; the
/// optional contract code is hex-wrapped so the script stays printable.
/// An account with no keys (and so no way to ever sign) is rejected.
pub fn create_account(keys: &[AccountPublicKey], code: Option<&[u8]>) -> Result<Vec<u8>> {
	if keys.is_empty() {
		return Err(Error::ScriptGeneration(
			"account creation requires at least one public key".into(),
		));
	}

	let key_list = keys
		.iter()
		.map(|k| format!("\"{}\"", hex::encode(k.encode())))
		.collect::<Vec<_>>()
		.join(", ");
	let code_hex = code.map(hex::encode).unwrap_or_default();

	let script = format!(
		"transaction {{\n\
		 \texecute {{\n\
		 \t\tcreateAccount(publicKeys: [{key_list}], code: \"{code_hex}\".decodeHex())\n\
		 \t}}\n\
		 }}\n"
	);
	Ok(script.into_bytes())
}

/// Generate the script that deploys (or updates) a named contract on
/// the signing account, passing the declared constructor arguments as
/// JSON literals.
pub fn deploy_contract(
	name: &str,
	code: &[u8],
	args: &[ContractArgument],
	update: bool,
) -> Result<Vec<u8>> {
	if code.is_empty() {
		return Err(Error::ScriptGeneration(format!(
			"contract {name} has no source code to deploy"
		)));
	}

	let verb = if update { "update" } else { "add" };
	let rendered_args = args
		.iter()
		.map(|a| {
			let value = serde_json::to_string(&a.value)
				.map_err(|e| Error::ScriptGeneration(e.to_string()))?;
			Ok(format!("{}: {}", a.name, value))
		})
		.collect::<Result<Vec<_>>>()?
		.join(", ");

	let code_hex = hex::encode(code);
	let script = format!(
		"transaction {{\n\
		 \tprepare(signer: Account) {{\n\
		 \t\tsigner.contracts.{verb}(name: \"{name}\", code: \"{code_hex}\".decodeHex()\
		 {}{rendered_args})\n\
		 \t}}\n\
		 }}\n",
		if rendered_args.is_empty() { "" } else { ", " },
	);
	Ok(script.into_bytes())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crypto::{
		HashAlgorithm, KeyMaterial, SignatureAlgorithm, ACCOUNT_KEY_WEIGHT_THRESHOLD,
	};

	fn sample_key() -> AccountPublicKey {
		KeyMaterial::decode_hex(
			SignatureAlgorithm::EcdsaP256,
			HashAlgorithm::Sha3_256,
			"dd72967fd2bd75234ae9037dd4694c1f00baad63a10c35172bf65fbb8ad74b47",
		)
		.unwrap()
		.account_key(ACCOUNT_KEY_WEIGHT_THRESHOLD)
	}

	#[test]
	fn create_account_embeds_each_key() {
		let key = sample_key();
		let script = create_account(&[key.clone()], None).unwrap();
		let text = String::from_utf8(script).unwrap();
		assert!(text.contains(&hex::encode(key.encode())));
		assert!(text.contains("createAccount"));
	}

	#[test]
	fn create_account_is_deterministic() {
		let keys = [sample_key()];
		assert_eq!(
			create_account(&keys, Some(b"code")).unwrap(),
			create_account(&keys, Some(b"code")).unwrap()
		);
	}

	#[test]
	fn create_account_rejects_an_empty_key_list() {
		let err = create_account(&[], None).unwrap_err();
		assert!(matches!(err, Error::ScriptGeneration(_)));
	}

	#[test]
	fn create_account_code_is_hex_wrapped() {
		let script = create_account(&[sample_key()], Some(b"contract C {}")).unwrap();
		let text = String::from_utf8(script).unwrap();
		assert!(text.contains(&hex::encode(b"contract C {}")));
	}

	#[test]
	fn deploy_contract_switches_verb_on_update() {
		let add = deploy_contract("Token", b"contract T {}", &[], false).unwrap();
		let update = deploy_contract("Token", b"contract T {}", &[], true).unwrap();
		assert!(String::from_utf8(add).unwrap().contains("contracts.add"));
		assert!(String::from_utf8(update).unwrap().contains("contracts.update"));
	}

	#[test]
	fn deploy_contract_renders_constructor_args() {
		let args = vec![
			ContractArgument { name: "supply".into(), value: serde_json::json!(1000) },
			ContractArgument { name: "symbol".into(), value: serde_json::json!("TOK") },
		];
		let script = deploy_contract("Token", b"contract T {}", &args, false).unwrap();
		let text = String::from_utf8(script).unwrap();
		assert!(text.contains("supply: 1000"));
		assert!(text.contains("symbol: \"TOK\""));
	}

	#[test]
	fn deploy_contract_rejects_empty_code() {
		let err = deploy_contract("Token", b"", &[], false).unwrap_err();
		assert!(matches!(err, Error::ScriptGeneration(_)));
	}
}
