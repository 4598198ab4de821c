use super::exposure::RouteExposure;
use crate::context::{Context, NodeType};
use crate::error::{CheckResult, PluginError};
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::Finding;
use crate::reporting::{Issue, Severity};
use crate::rpc::{IpfsClient, IpfsRequest};
use serde_json::Value;

const ENVIRONMENT_LEAK: &str = "This allows an attacker to obtain information about the system's Go version, \
     operating system, as well as the IPFS node's version and origin repository";

/// 检测版本接口是否可以访问
pub fn version() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("Version", "Detect whether the node's version endpoint is available")
            .with_property("severity", "low"),
        IpfsRequest::new("/api/v0/version"),
        Finding::new(
            "Version Information Leak",
            format!(
                "Version information of the node and its execution environment is exposed. {}",
                ENVIRONMENT_LEAK
            ),
            Severity::Low,
        ),
    )
}

/// 列出节点依赖的版本，并标记已被替换的依赖
pub struct DependencyVersion {
    metadata: PluginMetadata,
    client: IpfsClient,
    check_dependencies: bool,
}

impl DependencyVersion {
    pub fn new(check_dependencies: bool) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "DependencyVersion",
                "Detect whether the node's dependency versions are exposed",
            )
            .with_property("severity", "low"),
            client: IpfsClient::new(),
            check_dependencies,
        }
    }
}

impl Default for DependencyVersion {
    fn default() -> Self {
        Self::new(true)
    }
}

/// 依赖列表是按行分隔的 JSON 文档
fn parse_dependencies(text: &str) -> Result<Vec<Value>, PluginError> {
    text.split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(|e| PluginError::Decode(e.to_string())))
        .collect()
}

fn is_replaced(dependency: &Value) -> bool {
    dependency
        .get("ReplacedBy")
        .and_then(Value::as_str)
        .is_some_and(|replaced| !replaced.is_empty())
}

impl Plugin for DependencyVersion {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if context.node_type() != NodeType::Ipfs {
            return Ok(());
        }

        let text = self
            .client
            .text(context.target(), IpfsRequest::new("/api/v0/version/deps"))?;
        let dependencies = parse_dependencies(&text)?;

        context.add_issue(
            Issue::new(
                "Dependency Version Information Leak",
                format!("Dependency version information is exposed. {}", ENVIRONMENT_LEAK),
                Severity::Low,
            )
            .raw_data(dependencies.clone()),
        )?;

        if !self.check_dependencies {
            return Ok(());
        }

        for dependency in dependencies.into_iter().filter(is_replaced) {
            context.add_issue(
                Issue::new(
                    "Outdated Dependency",
                    "The IPFS node has been compiled with an old dependency version. \
                     Consider upgrading it for the latest feature and security updates.",
                    Severity::Low,
                )
                .raw_data(dependency),
            )?;
        }
        Ok(())
    }
}
