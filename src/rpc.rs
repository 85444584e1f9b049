use std::time::Duration;

use serde_json::{json, Value};

use crate::errors::{Error, Result};
use crate::tx_builder::Transaction;

/// Acknowledgement returned by the ledger for an accepted transaction.
/// Nothing beyond success is inspected here; richer receipt handling
/// belongs to the callers that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
	pub tx_hash: String,
}

/// The submission boundary.  A trait so command pipelines can run
/// against an in-process fake in tests; the real implementation speaks
/// JSON-RPC over HTTP.
#[async_trait::async_trait]
pub trait LedgerClient: Send + Sync {
	/// Submit a fully signed transaction.  A timed-out or cancelled
	/// attempt fails with a submission error and leaves the descriptor
	/// untouched and re-submittable.
	async fn submit(&self, tx: &Transaction) -> Result<Receipt>;
}

/// JSON-RPC client for a ledger access node.
pub struct HttpLedgerClient {
	url: String,
	http: reqwest::Client,
	timeout: Option<Duration>,
}

impl HttpLedgerClient {
	pub fn new(host: &str) -> Self {
		Self {
			url: normalize_url(host),
			http: reqwest::Client::new(),
			timeout: None,
		}
	}

	/// Apply a per-request timeout to every call made by this client.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Fetch the status record for a submitted transaction, or `None`
	/// if the node does not know the hash.
	pub async fn transaction_status(&self, tx_hash: &str) -> Result<Option<Value>> {
		let result = self.call("get_transaction", json!([tx_hash])).await?;
		Ok(if result.is_null() { None } else { Some(result) })
	}

	/// Run a single JSON-RPC call and unwrap the `result` field.
	async fn call(&self, method: &str, params: Value) -> Result<Value> {
		let body = json!({
			"id": 1,
			"jsonrpc": "2.0",
			"method": method,
			"params": params,
		});

		let mut request = self.http.post(&self.url).json(&body);
		if let Some(t) = self.timeout {
			request = request.timeout(t);
		}

		let resp: Value = request
			.send()
			.await
			.map_err(|e| Error::Submission(e.to_string()))?
			.json()
			.await
			.map_err(|e| Error::Submission(e.to_string()))?;

		if let Some(err) = resp.get("error") {
			return Err(Error::Submission(format!("{method} RPC error: {err}")));
		}
		resp.get("result")
			.cloned()
			.ok_or_else(|| Error::Submission(format!("{method} response missing result")))
	}
}

#[async_trait::async_trait]
impl LedgerClient for HttpLedgerClient {
	async fn submit(&self, tx: &Transaction) -> Result<Receipt> {
		let result = self.call("send_transaction", json!([tx_to_wire(tx)])).await?;
		let tx_hash = result
			.as_str()
			.map(str::to_owned)
			.unwrap_or_else(|| result.to_string());
		Ok(Receipt { tx_hash })
	}
}

// -- Wire encoding --

/// Wire form of a transaction: bytes as 0x-hex, addresses as strings,
/// signatures as an address-ordered list of entries.
fn tx_to_wire(tx: &Transaction) -> Value {
	let signatures: Vec<Value> = tx
		.signatures
		.iter()
		.map(|(address, signature)| {
			json!({
				"address": address.to_string(),
				"signature": format!("0x{}", hex::encode(signature)),
			})
		})
		.collect();

	json!({
		"script": format!("0x{}", hex::encode(&tx.script)),
		"nonce": tx.nonce,
		"compute_limit": tx.compute_limit,
		"payer": tx.payer.to_string(),
		"authorizers": tx.authorizers.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
		"signatures": signatures,
	})
}

fn normalize_url(host: &str) -> String {
	if host.starts_with("http://") || host.starts_with("https://") {
		host.to_owned()
	} else {
		format!("http://{host}")
	}
}
