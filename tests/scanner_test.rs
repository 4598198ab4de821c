mod common;

use common::{unreachable_target, MockNode, RecordingObserver};
use serde_json::json;
use std::sync::{Arc, Mutex};
use teatime::error::{CheckResult, ReportError, ScanError};
use teatime::{Context, Issue, NodeType, Plugin, PluginMetadata, Scanner, Severity};

/// 记录调用顺序的测试插件
struct Tracer {
    metadata: PluginMetadata,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Tracer {
    fn new(name: &str, intrusive: bool, calls: &Arc<Mutex<Vec<String>>>) -> Box<dyn Plugin> {
        Box::new(Self {
            metadata: PluginMetadata::new(name, "records calls").intrusive(intrusive),
            calls: Arc::clone(calls),
        })
    }
}

impl Plugin for Tracer {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, _context: &mut Context) -> CheckResult {
        self.calls.lock().unwrap().push(self.metadata.name.clone());
        Ok(())
    }
}

struct Incomplete;

impl Plugin for Incomplete {
    fn metadata(&self) -> &PluginMetadata {
        static METADATA: std::sync::OnceLock<PluginMetadata> = std::sync::OnceLock::new();
        METADATA.get_or_init(|| PluginMetadata::new("Incomplete", "adds a broken issue"))
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        context.add_issue(Issue::draft().title("x"))?;
        Ok(())
    }
}

#[test]
fn target_is_built_from_host_and_port() {
    let scanner = Scanner::new("127.0.0.1", 8545, NodeType::Geth, Vec::new());
    assert_eq!(scanner.target(), "http://127.0.0.1:8545");
    assert_eq!(scanner.node_type(), NodeType::Geth);
    assert_eq!(
        scanner.to_string(),
        "<Scanner target=http://127.0.0.1:8545 plugins=0 node_type=GETH>"
    );
}

#[test]
fn intrusive_plugins_are_announced_once() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let observer = Arc::new(RecordingObserver::default());
    let scanner = Scanner::with_target(
        unreachable_target(),
        NodeType::Geth,
        vec![Tracer::new("PluginA", true, &calls), Tracer::new("PluginB", false, &calls)],
    )
    .with_observer(observer.clone());

    let report = scanner.run().unwrap();

    assert_eq!(*calls.lock().unwrap(), vec!["PluginA", "PluginB"]);
    assert_eq!(observer.count("intrusive:"), 1);
    assert_eq!(observer.events()[0], "intrusive:PluginA");
    assert!(report.has_run("PluginA"));
    assert!(report.has_run("PluginB"));
}

#[test]
fn intrusive_plugin_issues_are_recorded() {
    let node = MockNode::new().rpc_result("admin_startRPC", json!(true));
    let target = node.start();
    let observer = Arc::new(RecordingObserver::default());

    let report = Scanner::with_target(
        &target,
        NodeType::Geth,
        vec![Box::new(teatime::plugins::eth1::geth_start_rpc())],
    )
    .with_observer(observer.clone())
    .run()
    .unwrap();

    assert_eq!(observer.events()[0], "intrusive:GethStartRPC");
    assert_eq!(report.issues().len(), 1);
    assert_eq!(report.issues()[0].title.as_deref(), Some("Admin RPC Start Rights"));
    assert_eq!(report.issues()[0].severity, Some(Severity::Critical));
    assert!(report.has_run("GethStartRPC"));
    assert!(!report.ok());
}

#[test]
fn report_preserves_plugin_order_and_elapsed() {
    let node = MockNode::new()
        .rpc_result("txpool_content", json!({"pending": {}}))
        .rpc_result("txpool_inspect", json!({"queued": {}}))
        .rpc_result("txpool_status", json!({"pending": "0x1"}));
    let target = node.start();

    let plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(teatime::plugins::eth1::geth_tx_pool_status()),
        Box::new(teatime::plugins::eth1::tx_pool_content()),
        Box::new(teatime::plugins::eth1::geth_tx_pool_inspection()),
    ];
    let report = Scanner::with_target(&target, NodeType::Geth, plugins)
        .with_extra("scan", "order")
        .run()
        .unwrap();

    let titles: Vec<&str> = report
        .issues()
        .iter()
        .filter_map(|i| i.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["TxPool Status", "TxPool Content", "TxPool Inspection"]);
    assert_eq!(node.requests(), vec!["txpool_status", "txpool_content", "txpool_inspect"]);
    assert!(report.meta()["elapsed"].as_f64().unwrap() >= 0.0);
    assert_eq!(report.meta().len(), 4);
    assert!(report.issues().iter().all(|i| i.severity == Some(Severity::Low)));
    assert!(report.ok());
}

#[test]
fn incomplete_issue_aborts_the_scan() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let scanner = Scanner::with_target(
        unreachable_target(),
        NodeType::Ipfs,
        vec![Box::new(Incomplete), Tracer::new("After", false, &calls)],
    );

    let err = scanner.run().unwrap_err();
    match err {
        ScanError::Aborted { plugin, source } => {
            assert_eq!(plugin, "Incomplete");
            assert!(matches!(source, ReportError::IncompleteIssue(_)));
        }
    }
    assert!(calls.lock().unwrap().is_empty());
}
