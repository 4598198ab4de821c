mod common;

use common::{unreachable_target, MockNode, RecordingObserver};
use serde_json::{json, Value};
use std::sync::Arc;
use teatime::plugins::eth1;
use teatime::{Context, NodeType, Plugin, Report};

fn context(target: &str, node_type: NodeType) -> Context {
    Context::new(target, Report::new(target), node_type)
}

#[test]
fn successful_call_records_one_issue() {
    let node = MockNode::new().rpc_result("admin_datadir", json!("0xABC"));
    let target = node.start();
    let plugin = eth1::geth_datadir();

    let mut ctx = context(&target, NodeType::Geth);
    plugin.run(&mut ctx).unwrap();

    let report = ctx.into_report();
    assert_eq!(report.issues().len(), 1);
    assert_eq!(report.issues()[0].raw_data, json!("0xABC"));
    assert_eq!(report.meta().get("GethDatadir"), Some(&Value::Bool(true)));
}

#[test]
fn rpc_error_is_swallowed() {
    let node = MockNode::new().rpc_error("admin_datadir", "Method not found");
    let target = node.start();
    let observer = Arc::new(RecordingObserver::default());
    let plugin = eth1::geth_datadir();

    let mut ctx = context(&target, NodeType::Geth).with_observer(observer.clone());
    plugin.run(&mut ctx).unwrap();

    assert!(ctx.report().issues().is_empty());
    assert!(ctx.report().has_run("GethDatadir"));
    assert_eq!(
        observer.events(),
        vec![
            "started:GethDatadir".to_string(),
            "skipped:GethDatadir:Method not found".to_string(),
        ]
    );
}

#[test]
fn wrong_node_type_calls_no_transport() {
    let node = MockNode::new().rpc_result("admin_datadir", json!("/data"));
    let target = node.start();
    let plugin = eth1::geth_datadir();

    let mut ctx = context(&target, NodeType::Parity);
    plugin.run(&mut ctx).unwrap();

    assert!(node.requests().is_empty());
    assert!(ctx.report().issues().is_empty());
    assert!(ctx.report().has_run("GethDatadir"));
}

#[test]
fn unreachable_node_is_skipped_every_time() {
    let target = unreachable_target();
    let observer = Arc::new(RecordingObserver::default());
    let plugin = eth1::geth_node_info();

    let mut ctx = context(&target, NodeType::Geth).with_observer(observer.clone());
    plugin.run(&mut ctx).unwrap();
    plugin.run(&mut ctx).unwrap();

    assert!(ctx.report().issues().is_empty());
    assert_eq!(ctx.report().meta().len(), 1);
    assert!(ctx.report().has_run("GethNodeInfo"));
    assert_eq!(observer.count("skipped:GethNodeInfo:Connection Error"), 2);
}

#[test]
fn http_status_is_recognized_failure() {
    let node = MockNode::new().rpc_status("admin_nodeInfo", 403);
    let target = node.start();
    let observer = Arc::new(RecordingObserver::default());

    let mut ctx = context(&target, NodeType::Geth).with_observer(observer.clone());
    eth1::geth_node_info().run(&mut ctx).unwrap();

    assert!(ctx.report().issues().is_empty());
    assert_eq!(
        observer.events()[1],
        "skipped:GethNodeInfo:RPC call returned with status 403"
    );
}

#[test]
fn null_result_is_empty_result() {
    let node = MockNode::new().rpc_result("admin_nodeInfo", Value::Null);
    let target = node.start();
    let observer = Arc::new(RecordingObserver::default());

    let mut ctx = context(&target, NodeType::Geth).with_observer(observer.clone());
    eth1::geth_node_info().run(&mut ctx).unwrap();

    assert!(ctx.report().issues().is_empty());
    assert_eq!(observer.count("skipped:GethNodeInfo:Received empty result"), 1);
}

#[test]
fn malformed_body_is_decode_failure() {
    let node = MockNode::new().rpc_raw("admin_nodeInfo", 200, "<html>not json</html>");
    let target = node.start();
    let observer = Arc::new(RecordingObserver::default());

    let mut ctx = context(&target, NodeType::Geth).with_observer(observer.clone());
    eth1::geth_node_info().run(&mut ctx).unwrap();

    assert!(ctx.report().issues().is_empty());
    assert_eq!(ctx.report().meta().get("GethNodeInfo"), Some(&Value::Bool(true)));
    assert_eq!(observer.count("skipped:GethNodeInfo:Could not decode response"), 1);
}
