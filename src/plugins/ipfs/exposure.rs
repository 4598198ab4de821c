use crate::context::{Context, NodeType};
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::Finding;
use crate::rpc::{IpfsClient, IpfsRequest};

/// 通用的 IPFS 接口暴露检查：请求成功即记录问题
pub struct RouteExposure {
    metadata: PluginMetadata,
    client: IpfsClient,
    request: IpfsRequest,
    finding: Finding,
}

impl RouteExposure {
    pub fn new(metadata: PluginMetadata, request: IpfsRequest, finding: Finding) -> Self {
        Self {
            metadata: metadata.with_property("route", request.route()),
            client: IpfsClient::new(),
            request,
            finding,
        }
    }

    pub fn with_client(mut self, client: IpfsClient) -> Self {
        self.client = client;
        self
    }

    pub fn request(&self) -> &IpfsRequest {
        &self.request
    }
}

impl Plugin for RouteExposure {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if context.node_type() != NodeType::Ipfs {
            return Ok(());
        }

        let payload = self.client.post(context.target(), &self.request)?;
        context.add_issue(self.finding.issue(payload.into_value()))?;
        Ok(())
    }
}
