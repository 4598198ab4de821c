// teatime 节点安全扫描库

pub mod config;
pub mod context;
pub mod error;
pub mod observer;
pub mod plugin;
pub mod plugins;
pub mod reporting;
pub mod rpc;
pub mod scanner;

// 重新导出常用类型
pub use config::{PluginEntry, ScanConfig};
pub use context::{Context, NodeType};
pub use error::{CheckError, CheckResult, PluginError, ReportError, ScanError};
pub use observer::{ScanObserver, TracingObserver};
pub use plugin::{Plugin, PluginMetadata};
pub use reporting::{Issue, Report, Severity};
pub use scanner::Scanner;
