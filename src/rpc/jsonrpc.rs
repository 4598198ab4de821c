use super::{build_client, DEFAULT_TIMEOUT, USER_AGENT};
use crate::error::PluginError;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// 以太坊风格的 JSON-RPC 2.0 调用助手
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    client: Client,
    request_id: u64,
}

impl JsonRpcClient {
    /// 使用默认超时（3 秒）创建客户端
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_options(timeout, USER_AGENT)
    }

    pub fn with_options(timeout: Duration, user_agent: &str) -> Self {
        Self {
            client: build_client(timeout, user_agent),
            request_id: 0,
        }
    }

    /// 设置请求中的 `id` 字段
    pub fn with_request_id(mut self, request_id: u64) -> Self {
        self.request_id = request_id;
        self
    }

    /// 调用 RPC 方法并返回 `result` 字段
    pub fn call(
        &self,
        target: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, PluginError> {
        debug!("JSON-RPC {} -> {}", method, target);
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": self.request_id,
        });

        let resp = self
            .client
            .post(target)
            .json(&body)
            .send()
            .map_err(|e| PluginError::Connection(e.to_string()))?;

        if resp.status() != StatusCode::OK {
            return Err(PluginError::Status(resp.status().as_u16()));
        }

        let payload: Value = resp
            .json()
            .map_err(|e| PluginError::Decode(e.to_string()))?;
        parse_response(payload)
    }

    /// 调用 RPC 方法并将结果按 `0x` 前缀的十六进制整数解码
    pub fn call_int(
        &self,
        target: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<u128, PluginError> {
        let result = self.call(target, method, params)?;
        parse_hex(&result)
    }
}

impl Default for JsonRpcClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_response(payload: Value) -> Result<Value, PluginError> {
    match payload.get("error") {
        None | Some(Value::Null) => {}
        Some(error) => {
            let message = match error.get("message") {
                Some(Value::String(message)) => message.clone(),
                _ => error.to_string(),
            };
            return Err(PluginError::Rpc(message));
        }
    }

    match payload.get("result") {
        None | Some(Value::Null) => Err(PluginError::EmptyResult(payload.to_string())),
        Some(result) => Ok(result.clone()),
    }
}

/// 解码 `0x` 前缀的十六进制整数
pub fn parse_hex(value: &Value) -> Result<u128, PluginError> {
    let text = value
        .as_str()
        .ok_or_else(|| PluginError::Decode(format!("expected hex string, got {}", value)))?;
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u128::from_str_radix(digits, 16)
        .map_err(|e| PluginError::Decode(format!("invalid hex integer {:?}: {}", text, e)))
}
