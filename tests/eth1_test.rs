mod common;

use common::MockNode;
use serde_json::json;
use teatime::plugins::eth1;
use teatime::{Context, NodeType, Plugin, Report, Severity};

fn scan(plugin: &dyn Plugin, target: &str, node_type: NodeType) -> Report {
    let mut ctx = Context::new(target, Report::new(target), node_type);
    plugin.run(&mut ctx).unwrap();
    ctx.into_report()
}

#[test]
fn peerlist_leak_picks_method_by_node_type() {
    let node = MockNode::new()
        .rpc_result("admin_peers", json!([]))
        .rpc_result("parity_netPeers", json!({"active": 0}));
    let target = node.start();
    let plugin = eth1::peerlist_leak();

    let geth = scan(&plugin, &target, NodeType::Geth);
    let parity = scan(&plugin, &target, NodeType::Parity);

    assert_eq!(geth.issues()[0].title.as_deref(), Some("Admin Peerlist Access"));
    assert_eq!(parity.issues()[0].title.as_deref(), Some("Peer list information leak"));
    assert_eq!(node.requests(), vec!["admin_peers", "parity_netPeers"]);
}

#[test]
fn truthy_only_checks_ignore_false_results() {
    let node = MockNode::new()
        .rpc_result("admin_startRPC", json!(false))
        .rpc_result("admin_stopRPC", json!(true));
    let target = node.start();

    let start = scan(&eth1::geth_start_rpc(), &target, NodeType::Geth);
    let stop = scan(&eth1::geth_stop_rpc(), &target, NodeType::Geth);

    assert!(start.issues().is_empty());
    assert!(start.has_run("GethStartRPC"));
    assert_eq!(stop.issues().len(), 1);
    assert_eq!(stop.issues()[0].severity, Some(Severity::Critical));
}

#[test]
fn parity_setters_send_hex_values() {
    let node = MockNode::new().rpc_result("parity_setGasCeilTarget", json!(true));
    let target = node.start();

    let report = scan(&eth1::parity_gas_ceiling(1000), &target, NodeType::Parity);
    assert_eq!(report.issues().len(), 1);
    assert_eq!(report.issues()[0].raw_data, json!(true));

    let geth = scan(&eth1::parity_gas_ceiling(1000), &target, NodeType::Geth);
    assert!(geth.issues().is_empty());
    assert_eq!(node.count("parity_setGasCeilTarget"), 1);
}

#[test]
fn mining_status_mismatch() {
    let node = MockNode::new().rpc_result("eth_mining", json!(true));
    let target = node.start();

    let expected = scan(&eth1::MiningStatus::new(true), &target, NodeType::Geth);
    let unexpected = scan(&eth1::MiningStatus::new(false), &target, NodeType::Geth);

    assert!(expected.issues().is_empty());
    assert_eq!(unexpected.issues().len(), 1);
    assert_eq!(
        unexpected.issues()[0].description.as_deref(),
        Some("The node should not be mining but is")
    );
}

#[test]
fn hashrate_and_peer_count_minimums() {
    let node = MockNode::new()
        .rpc_result("eth_hashrate", json!("0x10"))
        .rpc_result("net_peerCount", json!("0x2"));
    let target = node.start();

    assert_eq!(scan(&eth1::HashrateStatus::new(100), &target, NodeType::Geth).issues().len(), 1);
    assert!(scan(&eth1::HashrateStatus::new(16), &target, NodeType::Geth).issues().is_empty());
    assert_eq!(scan(&eth1::PeerCountStatus::new(5), &target, NodeType::Parity).issues().len(), 1);
    assert!(scan(&eth1::PeerCountStatus::new(2), &target, NodeType::Parity).issues().is_empty());
}

#[test]
fn hashrate_that_is_not_hex_is_skipped() {
    let node = MockNode::new().rpc_result("eth_hashrate", json!("fast"));
    let target = node.start();

    let report = scan(&eth1::HashrateStatus::new(100), &target, NodeType::Geth);
    assert!(report.issues().is_empty());
    assert!(report.has_run("HashrateStatus"));
}

#[test]
fn network_not_listening() {
    let node = MockNode::new().rpc_result("net_listening", json!(false));
    let target = node.start();

    let report = scan(&eth1::NetworkListening::new(), &target, NodeType::Geth);
    assert_eq!(report.issues().len(), 1);
    assert_eq!(report.issues()[0].severity, Some(Severity::High));
    assert!(!report.ok());
}

#[test]
fn sha3_consistency() {
    let node = MockNode::new().rpc_result("web3_sha3", json!("0xabc"));
    let target = node.start();

    let good = scan(&eth1::Sha3Consistency::new("0x68656c6c6f", "0xabc"), &target, NodeType::Geth);
    let bad = scan(&eth1::Sha3Consistency::new("0x68656c6c6f", "0xdef"), &target, NodeType::Geth);

    assert!(good.issues().is_empty());
    assert_eq!(bad.issues()[0].title.as_deref(), Some("SHA3 test failed"));
    assert_eq!(
        bad.issues()[0].description.as_deref(),
        Some("Expected 0xdef but received 0xabc")
    );
}

#[test]
fn stale_node_that_is_not_syncing() {
    let node = MockNode::new()
        .rpc_result("eth_syncing", json!(false))
        .rpc_result("eth_blockNumber", json!("0x1"));
    let reference = MockNode::new().rpc_result("eth_blockNumber", json!("0x100"));
    let target = node.start();
    let infura = reference.start();

    let report = scan(&eth1::NodeSync::new(&infura, 10), &target, NodeType::Geth);
    assert_eq!(report.issues().len(), 1);
    assert_eq!(report.issues()[0].severity, Some(Severity::Critical));
}

#[test]
fn synced_node_records_information() {
    let node = MockNode::new()
        .rpc_result("eth_syncing", json!(false))
        .rpc_result("eth_blockNumber", json!("0xfa"));
    let reference = MockNode::new().rpc_result("eth_blockNumber", json!("0x100"));
    let target = node.start();
    let infura = reference.start();

    let report = scan(&eth1::NodeSync::new(&infura, 10), &target, NodeType::Parity);
    assert_eq!(report.issues()[0].severity, Some(Severity::None));
    assert_eq!(
        report.issues()[0].description.as_deref(),
        Some("Syncing: false Block Number: 250")
    );
    assert!(report.ok());
}

#[test]
fn open_accounts_reports_balances() {
    let node = MockNode::new().rpc_result("eth_accounts", json!(["0x1", "0x2"]));
    let reference = MockNode::new().rpc_result("eth_getBalance", json!("0x0"));
    let target = node.start();
    let infura = reference.start();

    let report = scan(&eth1::OpenAccounts::new(&infura), &target, NodeType::Geth);
    assert_eq!(report.issues().len(), 2);
    assert_eq!(report.issues()[1].raw_data, json!("0x2"));
    assert_eq!(report.issues()[0].description.as_deref(), Some("Account: 0x1 Balance: 0"));
    assert_eq!(reference.count("eth_getBalance"), 2);
}

#[test]
fn account_unlock_stops_when_method_is_missing() {
    let node = MockNode::new()
        .rpc_result("eth_accounts", json!(["0x1"]))
        .rpc_error("personal_unlockAccount", "Method not found");
    let reference = MockNode::new().rpc_result("eth_getBalance", json!("0x10"));
    let target = node.start();
    let infura = reference.start();

    let wordlist = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let report = scan(&eth1::AccountUnlock::new(&infura, wordlist, None), &target, NodeType::Geth);

    assert!(report.issues().is_empty());
    assert_eq!(node.count("personal_unlockAccount"), 1);
}

#[test]
fn account_unlock_finds_weak_password() {
    let node = MockNode::new()
        .rpc_result("eth_accounts", json!(["0x1"]))
        .rpc_error("personal_unlockAccount", "could not decrypt key with given password")
        .rpc_result("personal_unlockAccount", json!(true));
    let reference = MockNode::new().rpc_result("eth_getBalance", json!("0x10"));
    let target = node.start();
    let infura = reference.start();

    let wordlist = vec!["wrong".to_string(), "hunter2".to_string()];
    let plugin = eth1::AccountUnlock::new(&infura, wordlist, None);
    let report = scan(&plugin, &target, NodeType::Parity);

    assert_eq!(report.issues().len(), 1);
    assert_eq!(
        report.issues()[0].description.as_deref(),
        Some("The account (0x1) is only protected by a weak password (hunter2)")
    );
    assert_eq!(node.count("personal_unlockAccount"), 2);
}

#[test]
fn account_unlock_skips_poor_accounts() {
    let node = MockNode::new()
        .rpc_result("eth_accounts", json!(["0x1"]))
        .rpc_result("personal_unlockAccount", json!(true));
    let reference = MockNode::new().rpc_result("eth_getBalance", json!("0x1"));
    let target = node.start();
    let infura = reference.start();

    let plugin = eth1::AccountUnlock::new(&infura, vec!["pw".to_string()], Some(100));
    let report = scan(&plugin, &target, NodeType::Geth);

    assert!(report.issues().is_empty());
    assert_eq!(node.count("personal_unlockAccount"), 0);
}

#[test]
fn outdated_node_version() {
    let node = MockNode::new().rpc_result(
        "web3_clientVersion",
        json!("Geth/v1.9.24-stable-cc05b050/linux-amd64/go1.15.5"),
    );
    let github = MockNode::new().route_json("/releases/latest", json!({"tag_name": "v1.10.1"}));
    let target = node.start();
    let releases = format!("{}/releases/latest", github.start());

    let plugin = eth1::NodeVersion::with_release_urls(&releases, &releases);
    let report = scan(&plugin, &target, NodeType::Geth);

    assert_eq!(report.issues().len(), 2);
    assert_eq!(report.issues()[0].severity, Some(Severity::None));
    assert_eq!(report.issues()[1].title.as_deref(), Some("Node version out of date"));
    assert_eq!(report.issues()[1].description.as_deref(), Some("1.9.24 != 1.10.1"));
}

#[test]
fn current_node_version() {
    let node =
        MockNode::new().rpc_result("web3_clientVersion", json!("OpenEthereum//v3.1.0-stable"));
    let github = MockNode::new().route_json("/releases/latest", json!({"tag_name": "v3.1.0"}));
    let target = node.start();
    let releases = format!("{}/releases/latest", github.start());

    let plugin = eth1::NodeVersion::with_release_urls(&releases, &releases);
    let report = scan(&plugin, &target, NodeType::Parity);

    assert_eq!(report.issues().len(), 1);
    assert!(report.ok());
}
