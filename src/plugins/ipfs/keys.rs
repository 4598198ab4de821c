use crate::context::{Context, NodeType};
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::reporting::{Issue, Severity};
use crate::rpc::{IpfsClient, IpfsRequest};
use serde_json::Value;
use tracing::debug;

/// 列出节点上的密钥，并可选地尝试逐个导出
pub struct KeyLeaks {
    metadata: PluginMetadata,
    client: IpfsClient,
    export: bool,
}

impl KeyLeaks {
    pub fn new(export: bool) -> Self {
        Self {
            metadata: PluginMetadata::new("KeyLeaks", "List and attempt to export the node's keys")
                .with_property("severity", "medium/critical"),
            client: IpfsClient::new(),
            export,
        }
    }
}

impl Default for KeyLeaks {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Plugin for KeyLeaks {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if context.node_type() != NodeType::Ipfs {
            return Ok(());
        }

        let key_list = self
            .client
            .json(context.target(), &IpfsRequest::new("/api/v0/key/list"))?;
        context.add_issue(
            Issue::new(
                "Key List Information Leak",
                "Anyone is able to list the keys registered on the node. The name of \
                 a key can leak information as well and is required for other actions \
                 such as exporting the key contents.",
                Severity::Medium,
            )
            .raw_data(key_list.clone()),
        )?;

        if !self.export {
            return Ok(());
        }

        let names = key_list
            .get("Keys")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|key| key.get("Name").and_then(Value::as_str));
        for name in names {
            let request = IpfsRequest::new("/api/v0/key/export").param("arg", name);
            let payload = match self.client.text(context.target(), request) {
                Ok(payload) => payload,
                Err(e) => {
                    debug!("Could not export key {}: {}", name, e);
                    continue;
                }
            };
            context.add_issue(
                Issue::new(
                    "Unauthorized Key Export",
                    "Anyone can export keys from the node. All secrets should be invalidated, \
                     rotated, and reapplied. The endpoint must be protected against future \
                     unauthorized use.",
                    Severity::Critical,
                )
                .raw_data(payload),
            )?;
        }
        Ok(())
    }
}
