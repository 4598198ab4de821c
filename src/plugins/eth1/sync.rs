use crate::context::Context;
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::{is_truthy, ETH1};
use crate::reporting::{Issue, Severity};
use crate::rpc::JsonRpcClient;

/// 检查节点的同步状态以及是否卡住
///
/// 节点没有在同步、且区块高度落后参考节点超过 `block_threshold` 时，
/// 记录严重问题；否则记录一条提示信息。
pub struct NodeSync {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
    infura_url: String,
    block_threshold: u128,
}

impl NodeSync {
    pub fn new(infura_url: &str, block_threshold: u128) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "NodeSync",
                "Check the node's sync state and whether it's stuck",
            )
            .with_property("severity", "none/critical"),
            rpc: JsonRpcClient::new(),
            infura_url: infura_url.to_string(),
            block_threshold,
        }
    }
}

impl Plugin for NodeSync {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if !ETH1.contains(&context.node_type()) {
            return Ok(());
        }

        let node_syncing = self.rpc.call(context.target(), "eth_syncing", Vec::new())?;
        let node_blocknum = self.rpc.call_int(context.target(), "eth_blockNumber", Vec::new())?;
        let net_blocknum = self.rpc.call_int(&self.infura_url, "eth_blockNumber", Vec::new())?;

        let stale = node_blocknum < net_blocknum.saturating_sub(self.block_threshold);
        let issue = if stale && !is_truthy(&node_syncing) {
            Issue::new(
                "Synchronization Status",
                "The node's block number is stale and its not synchronizing. The node is stuck!",
                Severity::Critical,
            )
        } else {
            Issue::new(
                "Synchronization Status",
                format!("Syncing: {} Block Number: {}", node_syncing, node_blocknum),
                Severity::None,
            )
        };
        context.add_issue(issue.raw_data(node_syncing))?;
        Ok(())
    }
}
