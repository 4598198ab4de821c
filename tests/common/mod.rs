#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use teatime::{PluginError, ScanObserver};

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
}

#[derive(Debug, Default)]
struct MockState {
    rpc: HashMap<String, VecDeque<Reply>>,
    routes: HashMap<String, VecDeque<Reply>>,
    requests: Vec<String>,
}

/// 模拟的 JSON-RPC / IPFS 节点
///
/// 每个方法或路径的回复按顺序取出，最后一个会一直重复。未配置的请求返回 404。
#[derive(Clone, Default)]
pub struct MockNode {
    state: Arc<Mutex<MockState>>,
}

impl MockNode {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_rpc(self, method: &str, status: u16, body: String) -> Self {
        self.state
            .lock()
            .unwrap()
            .rpc
            .entry(method.to_string())
            .or_default()
            .push_back(Reply { status, body });
        self
    }

    pub fn rpc_result(self, method: &str, result: Value) -> Self {
        let body = json!({"jsonrpc": "2.0", "id": 0, "result": result}).to_string();
        self.push_rpc(method, 200, body)
    }

    pub fn rpc_error(self, method: &str, message: &str) -> Self {
        let error = json!({"code": -32601, "message": message});
        let body = json!({"jsonrpc": "2.0", "id": 0, "error": error}).to_string();
        self.push_rpc(method, 200, body)
    }

    pub fn rpc_status(self, method: &str, status: u16) -> Self {
        self.push_rpc(method, status, String::new())
    }

    /// 原样返回给定的状态码和响应体
    pub fn rpc_raw(self, method: &str, status: u16, body: impl Into<String>) -> Self {
        self.push_rpc(method, status, body.into())
    }

    pub fn route(self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .entry(path.to_string())
            .or_default()
            .push_back(Reply {
                status,
                body: body.into(),
            });
        self
    }

    pub fn route_json(self, path: &str, value: Value) -> Self {
        self.route(path, 200, value.to_string())
    }

    /// 收到的请求：RPC 方法名，或带查询字符串的路径
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn count(&self, request: &str) -> usize {
        self.requests().iter().filter(|r| r.as_str() == request).count()
    }

    /// 在后台线程中启动服务，返回 `http://127.0.0.1:port`
    pub fn start(&self) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::clone(&self.state);

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                let app = Router::new().fallback(handle).with_state(state);
                axum::serve(listener, app).await.unwrap();
            });
        });

        format!("http://{}", addr)
    }
}

fn next_reply(queue: &mut VecDeque<Reply>) -> Option<Reply> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

async fn handle(
    State(state): State<Arc<Mutex<MockState>>>,
    uri: Uri,
    body: Bytes,
) -> (StatusCode, String) {
    let mut state = state.lock().unwrap();
    let method = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|v| v.get("method").and_then(Value::as_str).map(str::to_string));

    let reply = match method {
        Some(method) if uri.path() == "/" => {
            state.requests.push(method.clone());
            state.rpc.get_mut(&method).and_then(next_reply)
        }
        _ => {
            let request = match uri.query() {
                Some(query) => format!("{}?{}", uri.path(), query),
                None => uri.path().to_string(),
            };
            state.requests.push(request);
            state.routes.get_mut(uri.path()).and_then(next_reply)
        }
    };

    match reply {
        Some(reply) => (
            StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            reply.body,
        ),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

/// 没有任何服务监听的地址
pub fn unreachable_target() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// 记录所有扫描事件的观察者
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

impl ScanObserver for RecordingObserver {
    fn intrusive_plugin(&self, plugin: &str) {
        self.events.lock().unwrap().push(format!("intrusive:{}", plugin));
    }

    fn plugin_started(&self, plugin: &str) {
        self.events.lock().unwrap().push(format!("started:{}", plugin));
    }

    fn plugin_skipped(&self, plugin: &str, error: &PluginError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("skipped:{}:{}", plugin, error));
    }

    fn plugin_finished(&self, plugin: &str) {
        self.events.lock().unwrap().push(format!("finished:{}", plugin));
    }
}
