use crate::context::{Context, NodeType};
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::{is_truthy, Finding};
use crate::rpc::JsonRpcClient;
use serde_json::Value;

/// 对某类节点调用的一个 RPC 方法，以及调用成功时记录的问题
#[derive(Debug, Clone)]
pub struct Probe {
    pub nodes: &'static [NodeType],
    pub method: &'static str,
    pub params: Vec<Value>,
    pub finding: Finding,
}

impl Probe {
    pub fn new(nodes: &'static [NodeType], method: &'static str, finding: Finding) -> Self {
        Self {
            nodes,
            method,
            params: Vec::new(),
            finding,
        }
    }

    pub fn params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }
}

/// 通用的“方法暴露”检查
///
/// 选择第一个匹配节点类型的探针调用；调用成功即说明方法对外开放。
/// 没有匹配的探针时什么也不做。
pub struct MethodExposure {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
    probes: Vec<Probe>,
    only_if_truthy: bool,
}

impl MethodExposure {
    pub fn new(metadata: PluginMetadata, probes: Vec<Probe>) -> Self {
        let methods: Vec<&str> = probes.iter().map(|p| p.method).collect();
        Self {
            metadata: metadata.with_property("methods", &methods.join(",")),
            rpc: JsonRpcClient::new(),
            probes,
            only_if_truthy: false,
        }
    }

    /// 只有返回值为真时才记录问题
    pub fn only_if_truthy(mut self) -> Self {
        self.only_if_truthy = true;
        self
    }

    pub fn with_client(mut self, rpc: JsonRpcClient) -> Self {
        self.rpc = rpc;
        self
    }
}

impl Plugin for MethodExposure {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        let node_type = context.node_type();
        let Some(probe) = self.probes.iter().find(|p| p.nodes.contains(&node_type)) else {
            return Ok(());
        };

        let payload = self
            .rpc
            .call(context.target(), probe.method, probe.params.clone())?;
        if self.only_if_truthy && !is_truthy(&payload) {
            return Ok(());
        }

        context.add_issue(probe.finding.issue(payload))?;
        Ok(())
    }
}
