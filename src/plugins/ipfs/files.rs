// 文件与内容枚举检查

use super::exposure::RouteExposure;
use crate::context::{Context, NodeType};
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::Finding;
use crate::reporting::{Issue, Severity};
use crate::rpc::{IpfsClient, IpfsRequest};
use tracing::debug;

const CID_ENDPOINTS: [&str; 2] = ["/api/v0/ls", "/api/v0/file/ls"];

/// 检查给定的 CID 路径是否能在节点上列出
///
/// 每个路径分别在 `/api/v0/ls` 和 `/api/v0/file/ls` 上尝试，失败的路径直接跳过。
pub struct CIDFSEnum {
    metadata: PluginMetadata,
    client: IpfsClient,
    cid_paths: Vec<String>,
}

impl CIDFSEnum {
    pub fn new(cid_paths: Vec<String>) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "CIDFSEnum",
                "Check whether the given CIDs are present on the node",
            )
            .with_property("severity", "medium"),
            client: IpfsClient::new(),
            cid_paths,
        }
    }

    fn check_paths(&self, context: &mut Context, endpoint: &str) -> CheckResult {
        for ipfs_path in &self.cid_paths {
            let request = IpfsRequest::new(endpoint).param("arg", ipfs_path.as_str());
            let payload = match self.client.json(context.target(), &request) {
                Ok(payload) => payload,
                Err(e) => {
                    debug!("{} not listed on {}: {}", ipfs_path, endpoint, e);
                    continue;
                }
            };
            context.add_issue(
                Issue::new(
                    "Found an Exposed IPFS Content ID",
                    format!(
                        "A common IPFS file path is leaking directory contents of UNIX filesystem \
                         objects. Depending on where IPFS has been mounted, this can leak \
                         confidential information. Endpoint: {}",
                        endpoint
                    ),
                    Severity::Medium,
                )
                .raw_data(payload),
            )?;
        }
        Ok(())
    }
}

impl Plugin for CIDFSEnum {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if context.node_type() != NodeType::Ipfs {
            return Ok(());
        }
        for endpoint in CID_ENDPOINTS {
            self.check_paths(context, endpoint)?;
        }
        Ok(())
    }
}

/// 检查本地可变命名空间中的对象是否能被列出
pub fn unixfs_enum(path: &str) -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new(
            "UnixFSEnum",
            "Check whether the objects in the local mutable namespace can be listed",
        )
        .with_property("severity", "medium"),
        IpfsRequest::new("/api/v0/files/ls").param("arg", path),
        Finding::new(
            "Found an Exposed UNIX Filesystem Root",
            "The UNIX root directory path is leaking contents of UNIX filesystem \
             objects. An attacker can use this endpoint along with the /files/read \
             endpoint to enumerate potentially confidential data on the system.",
            Severity::Medium,
        ),
    )
}

pub fn filestore_enum() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new(
            "FilestoreEnum",
            "Check whether the objects in the filestore can be listed",
        )
        .with_property("severity", "medium"),
        IpfsRequest::new("/api/v0/filestore/ls"),
        Finding::new(
            "Found Exposed Filestore Objects",
            "The filestore endpoint is leaking contents of its objects. An attacker \
             can use this endpoint to enumerate potentially confidential data on the \
             system.",
            Severity::Medium,
        ),
    )
}
