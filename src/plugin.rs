use crate::context::Context;
use crate::error::{CheckError, CheckResult, ScanError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// 插件元数据 - 可以被序列化，用于列出所有检查
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// 插件名称，同时作为报告元数据中的键
    pub name: String,
    /// 插件描述
    pub description: String,
    /// 执行成功是否会改变目标节点的状态
    pub intrusive: bool,
    /// 其他自定义属性
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl PluginMetadata {
    /// 创建一个新的插件元数据，默认不具侵入性
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            intrusive: false,
            properties: BTreeMap::new(),
        }
    }

    /// 设置是否具有侵入性
    pub fn intrusive(mut self, intrusive: bool) -> Self {
        self.intrusive = intrusive;
        self
    }

    /// 添加自定义属性
    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }
}

/// 扫描插件 trait
/// 所有检查必须实现此 trait
///
/// 实现者只需要提供 [`metadata`](Plugin::metadata) 和 [`check`](Plugin::check)，
/// 扫描器只会调用 [`run`](Plugin::run)。
pub trait Plugin: Send + Sync {
    /// 获取插件元数据
    fn metadata(&self) -> &PluginMetadata;

    /// 插件的稳定名称
    fn name(&self) -> &str {
        &self.metadata().name
    }

    fn is_intrusive(&self) -> bool {
        self.metadata().intrusive
    }

    /// 执行实际的探测
    ///
    /// 节点类型不适用时应直接返回 `Ok(())`。
    fn check(&self, context: &mut Context) -> CheckResult;

    /// 扫描器调用的入口
    ///
    /// 可识别的失败会被记录后吞掉；无论检查结果如何，
    /// 只要没有致命错误，都会在报告元数据中记录 `name -> true`。
    fn run(&self, context: &mut Context) -> Result<(), ScanError> {
        let name = self.name().to_string();
        context.observer().plugin_started(&name);

        match self.check(context) {
            Ok(()) => context.observer().plugin_finished(&name),
            Err(CheckError::Plugin(e)) => context.observer().plugin_skipped(&name, &e),
            Err(CheckError::Report(source)) => {
                return Err(ScanError::Aborted {
                    plugin: name,
                    source,
                })
            }
        }

        context.add_meta(name, true);
        Ok(())
    }
}

impl Debug for dyn Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Plugin {} intrusive={}>", self.name(), self.is_intrusive())
    }
}

/// 导出插件元数据为 JSON
pub fn export_metadata(plugins: &[Box<dyn Plugin>]) -> anyhow::Result<String> {
    let metadata: Vec<&PluginMetadata> = plugins.iter().map(|p| p.metadata()).collect();
    Ok(serde_json::to_string_pretty(&metadata)?)
}
