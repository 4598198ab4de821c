use super::exposure::{MethodExposure, Probe};
use crate::context::Context;
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::{int_value, is_truthy, Finding, ETH1, GETH, PARITY};
use crate::reporting::{Issue, Severity};
use crate::rpc::JsonRpcClient;
use serde_json::json;

/// 检查节点是否在监听新的对等节点（`net_listening`）
pub struct NetworkListening {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
}

impl NetworkListening {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new(
                "NetworkListening",
                "Check whether the node is listening for peers",
            )
            .with_property("severity", "high"),
            rpc: JsonRpcClient::new(),
        }
    }
}

impl Default for NetworkListening {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for NetworkListening {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if !ETH1.contains(&context.node_type()) {
            return Ok(());
        }

        let node_listening = self.rpc.call(context.target(), "net_listening", Vec::new())?;
        if !is_truthy(&node_listening) {
            context.add_issue(
                Issue::new(
                    "Node not listening to peers",
                    "The node is not listening to new peer requests",
                    Severity::High,
                )
                .raw_data(node_listening),
            )?;
        }
        Ok(())
    }
}

/// 检查对等节点数量是否达到下限（`net_peerCount`）
pub struct PeerCountStatus {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
    minimum_peercount: u128,
}

impl PeerCountStatus {
    pub fn new(minimum_peercount: u128) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "PeerCountStatus",
                "Check whether the node has a certain peer count",
            )
            .with_property("severity", "medium"),
            rpc: JsonRpcClient::new(),
            minimum_peercount,
        }
    }
}

impl Plugin for PeerCountStatus {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if !ETH1.contains(&context.node_type()) {
            return Ok(());
        }

        let current_peercount = self.rpc.call_int(context.target(), "net_peerCount", Vec::new())?;
        if self.minimum_peercount > current_peercount {
            context.add_issue(
                Issue::new(
                    "Number of peers too low!",
                    format!(
                        "Too few peers (current < minimum): {} < {}",
                        current_peercount, self.minimum_peercount
                    ),
                    Severity::Medium,
                )
                .raw_data(int_value(current_peercount)),
            )?;
        }
        Ok(())
    }
}

/// 尝试向节点的对等列表添加一个节点
pub fn peerlist_manipulation(test_enode: &str) -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new("PeerlistManipulation", "Try to add a peer to the node's peer list")
            .intrusive(true)
            .with_property("severity", "high"),
        vec![
            Probe::new(
                GETH,
                "admin_addPeer",
                Finding::new(
                    "Peer list manipulation",
                    "Arbitrary peers can be added using the admin_addPeer RPC call.",
                    Severity::High,
                ),
            )
            .params(vec![json!(test_enode)]),
            Probe::new(
                PARITY,
                "parity_addReservedPeer",
                Finding::new(
                    "Peer list manipulation",
                    "Reserved peers can be added to the node's peer list using the parity_addReservedPeer RPC call",
                    Severity::High,
                ),
            )
            .params(vec![json!(test_enode)]),
        ],
    )
    .only_if_truthy()
}

pub fn parity_drop_peers() -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new(
            "ParityDropPeers",
            "Try to remove non-reserved peers from the peer list",
        )
        .intrusive(true)
        .with_property("severity", "critical"),
        vec![Probe::new(
            PARITY,
            "parity_dropNonReservedPeers",
            Finding::new(
                "Peer list manipulation",
                "Anyone can drop the non-reserved peerlist on the node using the parity_dropNonReservedPeers RPC call.",
                Severity::Critical,
            ),
        )],
    )
    .only_if_truthy()
}
