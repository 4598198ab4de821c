// P2P 监听器与数据流相关的检查

use super::exposure::RouteExposure;
use crate::plugin::PluginMetadata;
use crate::plugins::Finding;
use crate::reporting::Severity;
use crate::rpc::IpfsRequest;

const MANAGEMENT_TITLE: &str = "Exposed P2P Management endpoint";

pub fn p2p_list_listeners() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("P2PListListeners", "Attempt to list all active P2P listeners")
            .with_property("severity", "low"),
        IpfsRequest::new("/api/v0/p2p/ls"),
        Finding::new(
            "Exposed P2P Listener List",
            "Anyone is able to list the P2P listener services running on this node. \
             This method may leak internal information on other peer-to-peer services \
             running on this node.",
            Severity::Low,
        ),
    )
}

pub fn p2p_list_streams() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("P2PListStreams", "Attempt to list all active P2P streams")
            .with_property("severity", "low"),
        IpfsRequest::new("/api/v0/p2p/stream/ls"),
        Finding::new(
            "Exposed P2P Stream List",
            "Anyone is able to list the active P2P streams on this node. \
             This method may leak internal information on other peer-to-peer services \
             and connections on this node.",
            Severity::Low,
        ),
    )
}

/// 关闭节点上所有活跃的 P2P 数据流
pub fn p2p_close_stream() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("P2PCloseStream", "Attempt to close all active P2P streams")
            .intrusive(true)
            .with_property("severity", "high"),
        IpfsRequest::new("/api/v0/p2p/stream/close")
            .param("all", "true")
            .raw(),
        Finding::new(
            MANAGEMENT_TITLE,
            "Anyone is able to close active P2P streams on this node. \
             This exposed functionality may be used by an attacker to \
             disrupt the node's availability and block connections.",
            Severity::High,
        ),
    )
}

/// 停止节点转发新的连接
pub fn p2p_stop_forwarding() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new(
            "P2PStopForwarding",
            "Attempt to stop the node from listening to new connection forwards",
        )
        .intrusive(true)
        .with_property("severity", "high"),
        IpfsRequest::new("/api/v0/p2p/close").param("all", "true").raw(),
        Finding::new(
            MANAGEMENT_TITLE,
            "Anyone is able to close active P2P forwardings on this node. \
             This exposed functionality may be used by an attacker to \
             disrupt the node's availability and block connections.",
            Severity::High,
        ),
    )
}

pub fn p2p_enable_forwarding() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new(
            "P2PEnableForwarding",
            "Attempt to enable forwarding new connections to the libp2p service",
        )
        .intrusive(true)
        .with_property("severity", "high"),
        IpfsRequest::new("/api/v0/p2p/forward")
            .param("arg", "/x/")
            .param("arg", "127.0.0.1")
            .param("arg", "127.0.0.1")
            .raw(),
        Finding::new(
            MANAGEMENT_TITLE,
            "Anyone is able to register P2P forwardings on this node. \
             This exposed functionality may be used by an attacker to \
             disrupt the node's availability and block connections.",
            Severity::High,
        ),
    )
}

pub fn p2p_create_listener() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new(
            "P2PCreateListener",
            "Attempt to register a new P2P listener on the node",
        )
        .intrusive(true)
        .with_property("severity", "high"),
        IpfsRequest::new("/api/v0/p2p/listen")
            .param("arg", "/teatime/")
            .param("arg", "127.0.0.1")
            .raw(),
        Finding::new(
            MANAGEMENT_TITLE,
            "Anyone is able to register P2P listeners on this node. \
             This exposed functionality may be used by an attacker to \
             disrupt the node's availability and block connections.",
            Severity::High,
        ),
    )
}
