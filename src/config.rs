use crate::context::NodeType;
use crate::plugin::Plugin;
use crate::plugins::build_plugin;
use crate::scanner::Scanner;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 扫描配置文件
///
/// ```json
/// {
///   "target": "http://127.0.0.1:8545",
///   "node_type": "geth",
///   "plugins": [{ "name": "GethDatadir" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    pub target: String,
    pub node_type: NodeType,
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

/// 配置中的一个检查
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub settings: Value,
}

fn default_enabled() -> bool {
    true
}

impl PluginEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            settings: Value::Null,
        }
    }

    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = settings;
        self
    }
}

impl ScanConfig {
    pub fn new(target: &str, node_type: NodeType) -> Self {
        Self {
            target: target.to_string(),
            node_type,
            extra: BTreeMap::new(),
            plugins: Vec::new(),
        }
    }

    /// 从文件加载配置
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// 按顺序构造所有启用的检查并创建扫描器
    ///
    /// 任何一个检查构造失败，都不会创建扫描器。
    pub fn build(&self) -> anyhow::Result<Scanner> {
        let plugins = self
            .plugins
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| build_plugin(&entry.name, &entry.settings))
            .collect::<anyhow::Result<Vec<Box<dyn Plugin>>>>()?;
        debug!("Built {} plugins from config", plugins.len());

        let scanner = Scanner::with_target(&self.target, self.node_type, plugins);
        let scanner = self
            .extra
            .iter()
            .fold(scanner, |scanner, (key, value)| {
                scanner.with_extra(key.as_str(), value.clone())
            });
        Ok(scanner)
    }
}
