//! Handshake requests for the two stratum dialects.
//!
//! Both are newline-terminated JSON-RPC objects with `id: 1`. Only the
//! legacy dialect carries `jsonrpc` and the credentials.

use crate::session::{Credentials, Protocol};
use serde::Serialize;

const CLIENT_AGENT: &str = "stratum-ping/1.0.0";
const STRATUM_VERSION: &str = "EthereumStratum/1.0.0";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Request<'a> {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<&'static str>,
    pub method: &'static str,
    pub params: [&'a str; 2],
}

impl<'a> Request<'a> {
    pub fn new(protocol: Protocol, credentials: &'a Credentials) -> Self {
        match protocol {
            Protocol::Legacy => Self {
                id: 1,
                jsonrpc: Some("2.0"),
                method: "eth_submitLogin",
                params: [credentials.login.as_str(), credentials.password.as_str()],
            },
            Protocol::Modern => Self {
                id: 1,
                jsonrpc: None,
                method: "mining.subscribe",
                params: [CLIENT_AGENT, STRATUM_VERSION],
            },
        }
    }

    /// Serialize to one JSON line, `\n` included.
    pub fn encode_line(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = serde_json::to_vec(self)?;
        buf.push(b'\n');
        Ok(buf)
    }
}
