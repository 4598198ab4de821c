// 插件使用的传输层：以太坊 JSON-RPC 与 IPFS HTTP API

pub mod ipfs;
pub mod jsonrpc;

pub use ipfs::{IpfsClient, IpfsPayload, IpfsRequest};
pub use jsonrpc::JsonRpcClient;

use reqwest::blocking::Client;
use std::time::Duration;

/// 每次外部调用的超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

pub const USER_AGENT: &str = "This is for research purposes, I promise!";

pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .unwrap_or_default()
}
