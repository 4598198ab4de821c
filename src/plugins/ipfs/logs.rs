// 日志子系统相关的检查

use super::exposure::RouteExposure;
use crate::plugin::PluginMetadata;
use crate::plugins::Finding;
use crate::reporting::Severity;
use crate::rpc::IpfsRequest;

/// `log/tail` 是一个不会结束的流，只读取这么多行
pub const DEFAULT_LOG_LINES: usize = 2;

pub fn enumerate_logs() -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("EnumerateLogs", "Attempt to list the node's logging subsystems")
            .with_property("severity", "low"),
        IpfsRequest::new("/api/v0/log/ls"),
        Finding::new(
            "Exposed Logging Subsystem Data",
            "It is possible to list the logging subsystems that the node \
             is using. This may be used by an attacker to find non-standard \
             customizations on the node, as well as fingerprint the node setup \
             for identification.",
            Severity::Low,
        ),
    )
}

/// 读取节点日志的前 `lines` 行
pub fn read_logs(lines: usize) -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("ReadLogs", "Attempt to read the node's log messages")
            .with_property("severity", "medium"),
        IpfsRequest::new("/api/v0/log/tail")
            .stream_limit(lines)
            .raw(),
        Finding::new(
            "Exposed System Log Data",
            "Anyone can list log messages generated by the node. Log messages, \
             especially debug-level ones, can leak sensitive information about \
             the node's setup and operations running on it.",
            Severity::Medium,
        ),
    )
}

/// 修改节点某个子系统的日志级别
pub fn change_log_level(subsystem: &str, level: &str) -> RouteExposure {
    RouteExposure::new(
        PluginMetadata::new("ChangeLogLevel", "Attempt to change the node's log level")
            .intrusive(true)
            .with_property("severity", "medium"),
        IpfsRequest::new("/api/v0/log/level")
            .param("arg", subsystem)
            .param("arg", level),
        Finding::new(
            "Exposed System Log Management",
            "Anyone can change the log level of messages generated by the node. \
             Log messages, especially debug-level ones, can leak sensitive information \
             about the node's setup and operations running on it. An attacker may unlock \
             additional information by enabling debug logs. This could also result in \
             degraded performance, especially when logs are stored in local files, or \
             in log aggregation systems unable to handle the load.",
            Severity::Medium,
        ),
    )
}
