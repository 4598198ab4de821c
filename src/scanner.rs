use crate::context::{Context, NodeType};
use crate::error::ScanError;
use crate::observer::{ScanObserver, TracingObserver};
use crate::plugin::Plugin;
use crate::reporting::Report;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// 扫描器 - 按顺序对一个目标执行所有插件
///
/// 插件列表在构造时固定，每次 [`run`](Scanner::run) 都会生成一份新的报告。
pub struct Scanner {
    target: String,
    node_type: NodeType,
    plugins: Vec<Box<dyn Plugin>>,
    extra: BTreeMap<String, Value>,
    observer: Arc<dyn ScanObserver>,
}

impl Scanner {
    /// 使用主机和端口创建扫描器，目标为 `http://host:port`
    pub fn new(host: &str, port: u16, node_type: NodeType, plugins: Vec<Box<dyn Plugin>>) -> Self {
        Self::with_target(format!("http://{}:{}", host, port), node_type, plugins)
    }

    /// 使用完整的目标 URI 创建扫描器
    pub fn with_target(
        target: impl Into<String>,
        node_type: NodeType,
        plugins: Vec<Box<dyn Plugin>>,
    ) -> Self {
        Self {
            target: target.into(),
            node_type,
            plugins,
            extra: BTreeMap::new(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// 使用自定义观察者
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// 传递给所有插件的额外配置
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn plugins(&self) -> &[Box<dyn Plugin>] {
        &self.plugins
    }

    /// 运行扫描并返回报告
    ///
    /// 插件中的可识别失败不会中断扫描；完整性错误会终止扫描且不返回报告。
    pub fn run(&self) -> Result<Report, ScanError> {
        let start = Instant::now();
        info!("Scanning {} ({}) with {} plugins", self.target, self.node_type, self.plugins.len());

        let mut context = Context::new(&self.target, Report::new(&self.target), self.node_type)
            .with_extra(self.extra.clone())
            .with_observer(Arc::clone(&self.observer));

        for plugin in &self.plugins {
            if plugin.is_intrusive() {
                self.observer.intrusive_plugin(plugin.name());
            }
            plugin.run(&mut context)?;
        }

        context.add_meta("elapsed", start.elapsed().as_secs_f64());
        Ok(context.into_report())
    }
}

impl fmt::Display for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Scanner target={} plugins={} node_type={}>",
            self.target,
            self.plugins.len(),
            self.node_type
        )
    }
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("target", &self.target)
            .field("node_type", &self.node_type)
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}
