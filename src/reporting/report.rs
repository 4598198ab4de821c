use super::issue::{Issue, Severity};
use crate::error::ReportError;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// 一次扫描的报告：问题列表加上任意元数据
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    id: String,
    target: String,
    timestamp: String,
    issues: Vec<Issue>,
    meta: BTreeMap<String, Value>,
}

impl Report {
    /// 为目标创建一个空报告
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            target: target.into(),
            timestamp: chrono::Local::now().to_rfc3339(),
            issues: Vec::new(),
            meta: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn meta(&self) -> &BTreeMap<String, Value> {
        &self.meta
    }

    /// 添加一个问题，不完整的问题会被拒绝
    pub fn add_issue(&mut self, issue: Issue) -> Result<(), ReportError> {
        if !issue.is_complete() {
            return Err(ReportError::IncompleteIssue(issue.to_string()));
        }
        self.issues.push(issue);
        Ok(())
    }

    /// 添加元数据，相同的键会被覆盖
    pub fn add_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.meta.insert(key.into(), value.into());
    }

    /// 没有任何严重问题时报告通过（空报告也通过）
    pub fn ok(&self) -> bool {
        !self.issues.iter().any(Issue::is_severe)
    }

    /// 严重程度不低于 `min` 的问题
    pub fn issues_by_severity(&self, min: Severity) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(move |issue| issue.severity.is_some_and(|s| s >= min))
    }

    /// 指定插件是否在本次扫描中执行过
    pub fn has_run(&self, plugin: &str) -> bool {
        self.meta.get(plugin) == Some(&Value::Bool(true))
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Report", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("target", &self.target)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("issues", &self.issues)?;
        state.serialize_field("meta", &self.meta)?;
        state.serialize_field("ok", &self.ok())?;
        state.end()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Report target={} issues={}>", self.target, self.issues.len())
    }
}
