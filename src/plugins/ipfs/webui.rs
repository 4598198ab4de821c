use crate::context::{Context, NodeType};
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::reporting::{Issue, Severity};
use crate::rpc::IpfsClient;

/// 尝试访问节点的 Web UI
///
/// 只用普通 GET 请求，状态码为 200 时记录问题，原始数据为跳转后的最终地址。
pub struct WebUIEnabled {
    metadata: PluginMetadata,
    client: IpfsClient,
    route: String,
}

impl WebUIEnabled {
    pub fn new(route: &str) -> Self {
        Self {
            metadata: PluginMetadata::new("WebUIEnabled", "Attempt to access the target's Web UI")
                .with_property("severity", "high")
                .with_property("route", route),
            client: IpfsClient::new(),
            route: route.to_string(),
        }
    }
}

impl Default for WebUIEnabled {
    fn default() -> Self {
        Self::new("/webui")
    }
}

impl Plugin for WebUIEnabled {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if context.node_type() != NodeType::Ipfs {
            return Ok(());
        }

        let (url, status) = self.client.get_status(context.target(), &self.route)?;
        if status == 200 {
            context.add_issue(
                Issue::new(
                    "Exposed Web UI",
                    "Anyone can access the Web UI. A plethora of administrative \
                     actions can be done through the web interface. This includes \
                     changing the node's configuration, which can be used to open \
                     other potential attack vectors.",
                    Severity::High,
                )
                .raw_data(url),
            )?;
        }
        Ok(())
    }
}
