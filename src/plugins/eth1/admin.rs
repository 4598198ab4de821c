// 管理接口相关的检查：信息泄露与服务启停

use super::exposure::{MethodExposure, Probe};
use crate::plugin::PluginMetadata;
use crate::plugins::{Finding, GETH, PARITY};
use crate::reporting::Severity;

/// 尝试读取 Geth 的数据目录
pub fn geth_datadir() -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new("GethDatadir", "Try to fetch Geth's data directory")
            .with_property("severity", "low"),
        vec![Probe::new(
            GETH,
            "admin_datadir",
            Finding::new(
                "Admin datadir access",
                "The datadir directory path can be fetched using the admin_datadir RPC call.",
                Severity::Low,
            ),
        )],
    )
}

pub fn geth_node_info() -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new("GethNodeInfo", "Try to fetch admin info about the node")
            .with_property("severity", "low"),
        vec![Probe::new(
            GETH,
            "admin_nodeInfo",
            Finding::new(
                "Admin Node Info Leaks",
                "Admin-only information can be fetched using the admin_nodeInfo RPC call.",
                Severity::Low,
            ),
        )],
    )
}

pub fn parity_dev_logs() -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new("ParityDevLogs", "Try to fetch the node's developer logs")
            .with_property("severity", "critical"),
        vec![Probe::new(
            PARITY,
            "parity_devLogs",
            Finding::new(
                "Developer log information leak",
                "The node's developer logs can be fetched using the parity_devLogs RPC call.",
                Severity::Critical,
            ),
        )],
    )
}

pub fn peerlist_leak() -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new("PeerlistLeak", "Try to fetch peer list information")
            .with_property("severity", "medium"),
        vec![
            Probe::new(
                PARITY,
                "parity_netPeers",
                Finding::new(
                    "Peer list information leak",
                    "Admin-only peer list information can be fetched with the parity_netPeers RPC call.",
                    Severity::Medium,
                ),
            ),
            Probe::new(
                GETH,
                "admin_peers",
                Finding::new(
                    "Admin Peerlist Access",
                    "Admin-only information about the peer list can be fetched using the admin_peers RPC call.",
                    Severity::Medium,
                ),
            ),
        ],
    )
}

/// 检查是否有可用的升级（`parity_upgradeReady`）
pub fn parity_upgrade() -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new("ParityUpgrade", "Try to check for an available upgrade")
            .with_property("severity", "critical"),
        vec![Probe::new(
            PARITY,
            "parity_upgradeReady",
            Finding::new(
                "The node can be upgraded",
                "A new node upgrade has been detected using the parity_upgradeReady RPC call.",
                Severity::Critical,
            ),
        )],
    )
}

fn geth_service_toggle(
    name: &str,
    description: &str,
    method: &'static str,
    finding: Finding,
) -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new(name, description)
            .intrusive(true)
            .with_property("severity", "critical"),
        vec![Probe::new(GETH, method, finding)],
    )
    .only_if_truthy()
}

pub fn geth_start_rpc() -> MethodExposure {
    geth_service_toggle(
        "GethStartRPC",
        "Try to start the RPC service",
        "admin_startRPC",
        Finding::new(
            "Admin RPC Start Rights",
            "The HTTP RPC service can be started using the admin_startRPC RPC call.",
            Severity::Critical,
        ),
    )
}

/// 尝试停止 HTTP RPC 服务，会影响之后的所有插件
pub fn geth_stop_rpc() -> MethodExposure {
    geth_service_toggle(
        "GethStopRPC",
        "Try to stop the RPC service",
        "admin_stopRPC",
        Finding::new(
            "Admin RPC Stop Rights",
            "The HTTP RPC service can be stopped using the admin_stopRPC RPC call.",
            Severity::Critical,
        ),
    )
}

pub fn geth_start_websocket() -> MethodExposure {
    geth_service_toggle(
        "GethStartWebsocket",
        "Try to start the websocket service",
        "admin_startWS",
        Finding::new(
            "Admin Websocket Start Rights",
            "The RPC Websocket service can be started using the admin_startWS RPC call.",
            Severity::Critical,
        ),
    )
}

pub fn geth_stop_websocket() -> MethodExposure {
    geth_service_toggle(
        "GethStopWebsocket",
        "Try to stop the websocket service",
        "admin_stopWS",
        Finding::new(
            "Admin Websocket Stop Rights",
            "The RPC Websocket service can be stopped using the admin_stopWS RPC call.",
            Severity::Critical,
        ),
    )
}
