use super::exposure::RouteExposure;
use crate::plugin::PluginMetadata;
use crate::plugins::Finding;
use crate::reporting::Severity;
use crate::rpc::IpfsRequest;

pub const DEFAULT_FILE_NAME: &str = ".teatime";
pub const DEFAULT_FILE_CONTENT: &str = "teatime test file";

/// 检测是否可以通过 `/add` 接口上传文件
pub fn open_upload_add(file_name: &str, file_content: &str) -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new(
            "OpenUploadAdd",
            "Detect whether it's possible to upload a file using the /add endpoint",
        )
        .intrusive(true)
        .with_property("severity", "high"),
        IpfsRequest::new("/api/v0/add").file(file_name, file_content.as_bytes()),
        Finding::new(
            "Anyone can upload data to the node",
            "Anyone is able to upload files to the node. An attacker can use this to \
             upload large amounts of data and thus prevent the node from accepting \
             further uploads, performing a Denial of Service (DoS) attack.",
            Severity::High,
        ),
    )
}
