use anyhow::Result;

use crate::cli::KeysCommand;
use crate::crypto::KeyMaterial;

pub fn run(cmd: &KeysCommand) -> Result<()> {
	match cmd {
		KeysCommand::Generate { sig_algo, hash_algo } => {
			let key = KeyMaterial::generate(sig_algo.as_algo(), hash_algo.as_algo());
			println!("Signature algorithm: {}", key.sig_algo());
			println!("Hash algorithm:      {}", key.hash_algo());
			println!("Private key:         {}", key.private_key_hex());
			println!("Public key:          {}", hex::encode(key.public_key()));
			Ok(())
		}
	}
}
