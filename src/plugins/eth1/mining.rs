use crate::context::Context;
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::{int_value, ETH1};
use crate::reporting::{Issue, Severity};
use crate::rpc::JsonRpcClient;
use serde_json::Value;

/// 检查节点的挖矿状态是否与预期一致（`eth_mining`）
pub struct MiningStatus {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
    should_mine: bool,
}

impl MiningStatus {
    pub fn new(should_mine: bool) -> Self {
        Self {
            metadata: PluginMetadata::new("MiningStatus", "Check whether the node is mining")
                .with_property("severity", "medium"),
            rpc: JsonRpcClient::new(),
            should_mine,
        }
    }
}

impl Plugin for MiningStatus {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if !ETH1.contains(&context.node_type()) {
            return Ok(());
        }

        let mining_status = self.rpc.call(context.target(), "eth_mining", Vec::new())?;
        if mining_status != Value::Bool(self.should_mine) {
            let description = if self.should_mine {
                "The node should be mining but isn't"
            } else {
                "The node should not be mining but is"
            };
            context.add_issue(
                Issue::new("Mining Status", description, Severity::Medium).raw_data(mining_status),
            )?;
        }
        Ok(())
    }
}

/// 检查节点的算力是否达到下限（`eth_hashrate`）
pub struct HashrateStatus {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
    expected_hashrate: u128,
}

impl HashrateStatus {
    pub fn new(expected_hashrate: u128) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "HashrateStatus",
                "Check whether the node has a certain hash rate",
            )
            .with_property("severity", "medium"),
            rpc: JsonRpcClient::new(),
            expected_hashrate,
        }
    }
}

impl Plugin for HashrateStatus {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if !ETH1.contains(&context.node_type()) {
            return Ok(());
        }

        let current_hashrate = self.rpc.call_int(context.target(), "eth_hashrate", Vec::new())?;
        if current_hashrate < self.expected_hashrate {
            context.add_issue(
                Issue::new(
                    "Mining Hashrate Low",
                    format!(
                        "The hashrate should be >= {} but only is {}",
                        self.expected_hashrate, current_hashrate
                    ),
                    Severity::Medium,
                )
                .raw_data(int_value(current_hashrate)),
            )?;
        }
        Ok(())
    }
}
