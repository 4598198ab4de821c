use crate::error::ReportError;
use crate::observer::{ScanObserver, TracingObserver};
use crate::reporting::{Issue, Report};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// 被扫描节点的类型，插件据此判断自己是否适用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Geth,
    Parity,
    Ipfs,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Geth => "GETH",
            NodeType::Parity => "PARITY",
            NodeType::Ipfs => "IPFS",
        };
        f.write_str(name)
    }
}

/// 插件之间传递的扫描上下文
///
/// 一次扫描只有一个上下文。插件可以读取目标和节点类型，
/// 只能通过 [`add_issue`](Self::add_issue) / [`add_meta`](Self::add_meta) 修改报告。
pub struct Context {
    target: String,
    node_type: NodeType,
    report: Report,
    extra: BTreeMap<String, Value>,
    observer: Arc<dyn ScanObserver>,
}

impl Context {
    /// 创建新的上下文，使用 `tracing` 作为默认观察者
    pub fn new(target: impl Into<String>, report: Report, node_type: NodeType) -> Self {
        Self {
            target: target.into(),
            node_type,
            report,
            extra: BTreeMap::new(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_extra(mut self, extra: BTreeMap<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// 插件特定的额外配置
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn observer(&self) -> &dyn ScanObserver {
        self.observer.as_ref()
    }

    pub fn add_issue(&mut self, issue: Issue) -> Result<(), ReportError> {
        self.report.add_issue(issue)
    }

    pub fn add_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.report.add_meta(key, value);
    }

    /// 结束扫描，取出报告
    pub fn into_report(self) -> Report {
        self.report
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("target", &self.target)
            .field("node_type", &self.node_type)
            .field("report", &self.report)
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}
