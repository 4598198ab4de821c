use crate::error::PluginError;
use tracing::{debug, info, warn};

/// 扫描过程事件的观察者
///
/// 由 [`Scanner`](crate::scanner::Scanner) 注入到 [`Context`](crate::context::Context) 中，
/// 所有方法默认不做任何事。
pub trait ScanObserver: Send + Sync {
    /// 即将执行一个会改变目标节点状态的插件
    fn intrusive_plugin(&self, _plugin: &str) {}

    fn plugin_started(&self, _plugin: &str) {}

    /// 插件因可识别的失败而跳过
    fn plugin_skipped(&self, _plugin: &str, _error: &PluginError) {}

    fn plugin_finished(&self, _plugin: &str) {}
}

/// 默认观察者，把事件转发给 `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn intrusive_plugin(&self, plugin: &str) {
        warn!(
            "Plugin {} is intrusive. Please make sure you have permission to run this scan on the target.",
            plugin
        );
    }

    fn plugin_started(&self, plugin: &str) {
        info!("Running scan: {}", plugin);
    }

    fn plugin_skipped(&self, plugin: &str, error: &PluginError) {
        info!("{}: Terminated with exception {}", plugin, error);
    }

    fn plugin_finished(&self, plugin: &str) {
        debug!("{}: finished", plugin);
    }
}
