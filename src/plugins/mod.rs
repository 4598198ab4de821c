pub mod eth1;
pub mod factory;
pub mod ipfs;

pub use factory::{build_plugin, catalogue};

use crate::context::NodeType;
use crate::reporting::{Issue, Severity};
use serde_json::Value;

pub const GETH: &[NodeType] = &[NodeType::Geth];
pub const PARITY: &[NodeType] = &[NodeType::Parity];
pub const ETH1: &[NodeType] = &[NodeType::Geth, NodeType::Parity];
pub const IPFS: &[NodeType] = &[NodeType::Ipfs];

/// 问题模板：标题、描述和严重程度，原始数据在发现时附加
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Finding {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn issue(&self, raw_data: impl Into<Value>) -> Issue {
        Issue::new(self.title.as_str(), self.description.as_str(), self.severity).raw_data(raw_data)
    }
}

/// RPC 返回值是否为“真”：`null`、`false`、`0`、空字符串与空集合视为假
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// 整数转换为 JSON 数字，超出 u64 范围时使用十进制字符串
pub fn int_value(value: u128) -> Value {
    match u64::try_from(value) {
        Ok(small) => Value::from(small),
        Err(_) => Value::String(value.to_string()),
    }
}
