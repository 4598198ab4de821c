use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// 问题严重程度，按 NONE < LOW < MEDIUM < HIGH < CRITICAL 排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Severity {
    /// 小写名称，用于报告序列化
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// 一个发现：漏洞、错误配置或提示信息
///
/// `title`、`description` 和 `severity` 可以为空，以便表示不完整的问题；
/// 不完整的问题无法加入 [`Report`](super::Report)。
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub raw_data: Value,
}

impl Issue {
    /// 创建一个完整的问题
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self::draft()
            .title(title)
            .description(description)
            .severity(severity)
    }

    /// 创建一个只有 ID 的空问题，通过链式方法补全
    pub fn draft() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: None,
            description: None,
            severity: None,
            raw_data: Value::Null,
        }
    }

    /// 使用指定的 ID 替换自动生成的 ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// 附加原始证据数据
    pub fn raw_data(mut self, raw_data: impl Into<Value>) -> Self {
        self.raw_data = raw_data.into();
        self
    }

    /// 严重程度高于 LOW 时视为严重
    pub fn is_severe(&self) -> bool {
        matches!(self.severity, Some(severity) if severity > Severity::Low)
    }

    pub fn is_complete(&self) -> bool {
        !self.id.is_empty()
            && self.title.is_some()
            && self.description.is_some()
            && self.severity.is_some()
    }

    /// 原始数据的字符串形式：字符串原样返回，其他值编码为 JSON
    pub fn raw_string(&self) -> String {
        match &self.raw_data {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Issue", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("severity", &self.severity.map(|s| s.as_str()))?;
        state.serialize_field("raw", &self.raw_string())?;
        state.end()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = self
            .severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "UNSET".to_string());
        write!(
            f,
            "<Issue severity={} title=\"{}\">",
            severity,
            self.title.as_deref().unwrap_or_default()
        )
    }
}
