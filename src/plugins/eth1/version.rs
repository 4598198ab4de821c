use crate::context::{Context, NodeType};
use crate::error::{CheckResult, PluginError};
use crate::plugin::{Plugin, PluginMetadata};
use crate::reporting::{Issue, Severity};
use crate::rpc::{build_client, JsonRpcClient, DEFAULT_TIMEOUT, USER_AGENT};
use regex::Regex;
use reqwest::blocking::Client;
use serde_json::Value;

const SEMVER_PATTERN: &str = r"\d+\.\d+\.\d+";

pub const GETH_RELEASES: &str = "https://api.github.com/repos/ethereum/go-ethereum/releases/latest";
pub const PARITY_RELEASES: &str =
    "https://api.github.com/repos/openethereum/openethereum/releases/latest";

/// 检查节点版本是否过期
///
/// 总会记录一条包含版本字符串的提示；Geth 与 Parity 节点还会
/// 与 GitHub 上的最新发布版本比较，不一致时记录高危问题。
pub struct NodeVersion {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
    http: Client,
    geth_url: String,
    parity_url: String,
}

impl NodeVersion {
    pub fn new() -> Self {
        Self::with_release_urls(GETH_RELEASES, PARITY_RELEASES)
    }

    pub fn with_release_urls(geth_url: &str, parity_url: &str) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "NodeVersion",
                "Check whether a given node's version is stale",
            )
            .with_property("severity", "none/high"),
            rpc: JsonRpcClient::new(),
            http: build_client(DEFAULT_TIMEOUT, USER_AGENT),
            geth_url: geth_url.to_string(),
            parity_url: parity_url.to_string(),
        }
    }

    /// 读取仓库最新发布的语义化版本号
    pub fn latest_repo_release(&self, url: &str) -> Result<String, PluginError> {
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| PluginError::Connection(e.to_string()))?;
        let repo_information: Value = resp
            .json()
            .map_err(|e| PluginError::Decode(format!("Could not decode API response: {}", e)))?;

        repo_information
            .get("tag_name")
            .and_then(Value::as_str)
            .and_then(extract_semver)
            .ok_or_else(|| {
                PluginError::Decode(format!(
                    "Could not extract repo tag from response {}",
                    repo_information
                ))
            })
    }
}

impl Default for NodeVersion {
    fn default() -> Self {
        Self::new()
    }
}

/// 提取字符串中第一个 `x.y.z` 形式的版本号
pub fn extract_semver(text: &str) -> Option<String> {
    let pattern = Regex::new(SEMVER_PATTERN).ok()?;
    pattern.find(text).map(|m| m.as_str().to_string())
}

impl Plugin for NodeVersion {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        let client_version = self.rpc.call(context.target(), "web3_clientVersion", Vec::new())?;
        context.add_issue(
            Issue::new(
                self.name(),
                "The node surfaces it's version information",
                Severity::None,
            )
            .raw_data(client_version.clone()),
        )?;

        let version_string = client_version.as_str().unwrap_or_default();
        let client_semver = extract_semver(version_string).ok_or_else(|| {
            PluginError::Decode(format!(
                "Could not extract the client version from string {}",
                client_version
            ))
        })?;

        let node_semver = match context.node_type() {
            NodeType::Geth => self.latest_repo_release(&self.geth_url)?,
            NodeType::Parity => self.latest_repo_release(&self.parity_url)?,
            other => {
                let reason = format!("No repo known for node type {}", other);
                return Err(PluginError::Unsupported(reason).into());
            }
        };

        if client_semver != node_semver {
            context.add_issue(
                Issue::new(
                    "Node version out of date",
                    format!("{} != {}", client_semver, node_semver),
                    Severity::High,
                )
                .raw_data(client_version),
            )?;
        }
        Ok(())
    }
}
