use thiserror::Error;

/// 插件级别的可识别失败
///
/// 这些错误来自目标节点或运行环境（连接失败、响应格式错误、节点不支持等），
/// 会在 [`Plugin::run`](crate::plugin::Plugin::run) 中被记录并吞掉，不会中断扫描。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    #[error("Connection Error: {0}")]
    Connection(String),

    #[error("RPC call returned with status {0}")]
    Status(u16),

    #[error("Could not decode response: {0}")]
    Decode(String),

    /// JSON-RPC 响应中的 `error.message`
    #[error("{0}")]
    Rpc(String),

    #[error("Received empty result in RPC response in {0}")]
    EmptyResult(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Invalid plugin configuration: {0}")]
    Config(String),
}

/// 报告完整性错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Encountered incomplete issue {0}")]
    IncompleteIssue(String),
}

/// 插件检查逻辑的返回错误
///
/// `Plugin` 变体会被吞掉；`Report` 变体说明插件本身有缺陷，会终止整个扫描。
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// 致命的扫描错误，扫描不会产出报告
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("plugin {plugin} aborted the scan: {source}")]
    Aborted {
        plugin: String,
        #[source]
        source: ReportError,
    },
}

pub type CheckResult = std::result::Result<(), CheckError>;
