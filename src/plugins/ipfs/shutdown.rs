use super::exposure::RouteExposure;
use crate::plugin::PluginMetadata;
use crate::plugins::Finding;
use crate::reporting::Severity;
use crate::rpc::IpfsRequest;

/// 尝试远程关闭 IPFS 守护进程
///
/// 检查成功意味着节点已经被关闭。
pub fn shutdown() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("Shutdown", "Attempt to shut down the IPFS daemon")
            .intrusive(true)
            .with_property("severity", "critical"),
        IpfsRequest::new("/api/v0/shutdown").raw(),
        Finding::new(
            "Exposed Shutdown Endpoint",
            "Anyone can shut down the IPFS daemon. This plugin has shut down the node. \
             This is the highest possible threat to availability.",
            Severity::Critical,
        ),
    )
}
