// 固定（pin）内容的列出与篡改检查

use super::exposure::RouteExposure;
use crate::context::{Context, NodeType};
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::Finding;
use crate::reporting::{Issue, Severity};
use crate::rpc::{IpfsClient, IpfsRequest};

/// 名为 "teatime" 的空文件
pub const DEFAULT_CID: &str = "Qmf9vKuR6MnTEGYXhzwpMib5EFGoXPWCJh3mXTvasb3Cas";

/// 检测是否可以固定新的内容
pub fn add_pin(cid: &str) -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("AddPin", "Detect whether it's possible to add a new pin")
            .intrusive(true)
            .with_property("severity", "high"),
        IpfsRequest::new("/api/v0/pin/add").param("arg", cid),
        Finding::new(
            "Anyone can pin data to the node",
            "Open pinning can enable an attacker to flush a large amount of \
             random data onto the node's disk until storage space is exhausted, \
             thus performing a denial of service attack against future uploads/pins.",
            Severity::High,
        ),
    )
}

pub fn enumerate_pins() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("EnumeratePins", "Detect whether it's possible to list the node's pins")
            .with_property("severity", "low"),
        IpfsRequest::new("/api/v0/pin/ls"),
        Finding::new(
            "Anyone can list the node's pins",
            "It is possible to list all the content IDs that \
             are pinned to the node's local storage.",
            Severity::Low,
        ),
    )
}

/// 检测是否可以移除节点上的 pin，`restore` 时随后重新固定
pub struct RemovePin {
    metadata: PluginMetadata,
    client: IpfsClient,
    pin: String,
    restore: bool,
}

impl RemovePin {
    pub fn new(pin: &str, restore: bool) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "RemovePin",
                "Detect whether it's possible to remove the node's pins",
            )
            .intrusive(true)
            .with_property("severity", "high"),
            client: IpfsClient::new(),
            pin: pin.to_string(),
            restore,
        }
    }
}

impl Default for RemovePin {
    fn default() -> Self {
        Self::new(DEFAULT_CID, true)
    }
}

impl Plugin for RemovePin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if context.node_type() != NodeType::Ipfs {
            return Ok(());
        }

        let payload = self.client.json(
            context.target(),
            &IpfsRequest::new("/api/v0/pin/rm").param("arg", self.pin.as_str()),
        )?;
        context.add_issue(
            Issue::new(
                "Anyone can remove the node's pins",
                "It is possible to remove all the content IDs that \
                 are pinned to the node's local storage. This poses \
                 a risk to data availability as an attacker can unpin \
                 any file.",
                Severity::High,
            )
            .raw_data(payload),
        )?;

        if self.restore {
            self.client.json(
                context.target(),
                &IpfsRequest::new("/api/v0/pin/add").param("arg", self.pin.as_str()),
            )?;
        }
        Ok(())
    }
}
