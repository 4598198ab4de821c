use super::{build_client, DEFAULT_TIMEOUT, USER_AGENT};
use crate::error::PluginError;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::Value;
use std::io::{BufRead, BufReader};
use std::time::Duration;
use tracing::debug;

/// IPFS HTTP API 请求
#[derive(Debug, Clone, Default)]
pub struct IpfsRequest {
    route: String,
    params: Vec<(String, String)>,
    files: Vec<(String, Vec<u8>)>,
    stream_limit: Option<usize>,
    raw: bool,
}

impl IpfsRequest {
    /// 创建请求，`route` 形如 `/api/v0/version`
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Default::default()
        }
    }

    /// 添加查询参数
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// 以 multipart 形式附加文件
    pub fn file(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.push((name.into(), content.into()));
        self
    }

    /// 流式读取响应，最多读取 `lines` 行
    pub fn stream_limit(mut self, lines: usize) -> Self {
        self.stream_limit = Some(lines);
        self
    }

    /// 返回原始文本而不是解析 JSON
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }
}

/// IPFS 响应内容
#[derive(Debug, Clone, PartialEq)]
pub enum IpfsPayload {
    Text(String),
    Json(Value),
}

impl IpfsPayload {
    /// 转换为 JSON 值，文本会变成字符串
    pub fn into_value(self) -> Value {
        match self {
            IpfsPayload::Text(text) => Value::String(text),
            IpfsPayload::Json(value) => value,
        }
    }
}

/// IPFS 风格的 HTTP 调用助手
#[derive(Debug, Clone)]
pub struct IpfsClient {
    client: Client,
}

impl IpfsClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout, USER_AGENT),
        }
    }

    /// 发送 POST 请求到 `target + route`
    pub fn post(&self, target: &str, request: &IpfsRequest) -> Result<IpfsPayload, PluginError> {
        let url = format!("{}{}", target, request.route);
        debug!("IPFS POST {}", url);

        let mut builder = self.client.post(&url).query(&request.params);
        if !request.files.is_empty() {
            let mut form = Form::new();
            for (name, content) in &request.files {
                let part = Part::bytes(content.clone()).file_name(name.clone());
                form = form.part(name.clone(), part);
            }
            builder = builder.multipart(form);
        }

        let resp = builder
            .send()
            .map_err(|e| PluginError::Connection(e.to_string()))?;
        if resp.status() != StatusCode::OK {
            return Err(PluginError::Status(resp.status().as_u16()));
        }

        let text = match request.stream_limit {
            Some(limit) => read_lines(resp, limit)?,
            None => resp.text().map_err(|e| PluginError::Decode(e.to_string()))?,
        };

        if request.raw {
            return Ok(IpfsPayload::Text(text));
        }
        parse_json(&text).map(IpfsPayload::Json)
    }

    /// 发送请求并返回 JSON
    pub fn json(&self, target: &str, request: &IpfsRequest) -> Result<Value, PluginError> {
        self.post(target, request).map(IpfsPayload::into_value)
    }

    /// 发送原始文本请求
    pub fn text(&self, target: &str, request: IpfsRequest) -> Result<String, PluginError> {
        match self.post(target, &request.raw())? {
            IpfsPayload::Text(text) => Ok(text),
            IpfsPayload::Json(value) => Ok(value.to_string()),
        }
    }

    /// 普通的 GET 请求，返回最终 URL（跟随重定向后）和状态码
    pub fn get_status(&self, target: &str, route: &str) -> Result<(String, u16), PluginError> {
        let url = format!("{}{}", target, route);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| PluginError::Connection(e.to_string()))?;
        Ok((resp.url().to_string(), resp.status().as_u16()))
    }
}

impl Default for IpfsClient {
    fn default() -> Self {
        Self::new()
    }
}

fn read_lines(resp: Response, limit: usize) -> Result<String, PluginError> {
    let mut lines = Vec::new();
    for line in BufReader::new(resp).lines().take(limit) {
        lines.push(line.map_err(|e| PluginError::Decode(e.to_string()))?);
    }
    Ok(lines.join("\n"))
}

/// 解析 JSON；多行的 NDJSON 响应会被解析为数组
fn parse_json(text: &str) -> Result<Value, PluginError> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }
    let documents = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(|e| PluginError::Decode(e.to_string())))
        .collect::<Result<Vec<Value>, _>>()?;
    if documents.is_empty() {
        return Err(PluginError::Decode("Empty response body".to_string()));
    }
    Ok(Value::Array(documents))
}
