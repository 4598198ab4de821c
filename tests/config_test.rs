mod common;

use common::MockNode;
use serde_json::json;
use std::io::Write;
use teatime::{NodeType, PluginEntry, ScanConfig};

#[test]
fn load_build_and_run() {
    let node = MockNode::new()
        .rpc_result("admin_datadir", json!("/data/geth"))
        .rpc_result("eth_mining", json!(true));
    let target = node.start();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    let config = json!({
        "target": target,
        "node_type": "geth",
        "extra": {"operator": "test"},
        "plugins": [
            {"name": "GethDatadir"},
            {"name": "ParityUpgrade", "enabled": false},
            {"name": "MiningStatus", "settings": {"should_mine": false}}
        ]
    });
    write!(file, "{}", config).unwrap();

    let config = ScanConfig::load(file.path()).unwrap();
    assert_eq!(config.node_type, NodeType::Geth);
    assert_eq!(config.extra["operator"], json!("test"));

    let report = config.build().unwrap().run().unwrap();
    assert_eq!(report.issues().len(), 2);
    assert!(report.has_run("GethDatadir"));
    assert!(report.has_run("MiningStatus"));
    assert!(!report.has_run("ParityUpgrade"));
    assert_eq!(node.requests(), vec!["admin_datadir", "eth_mining"]);
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.json");

    let mut config = ScanConfig::new("http://127.0.0.1:5001", NodeType::Ipfs);
    config.plugins.push(PluginEntry::new("Version"));
    config
        .plugins
        .push(PluginEntry::new("ReadLogs").with_settings(json!({"lines": 5})));
    config.save(&path).unwrap();

    let loaded = ScanConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.build().unwrap().plugins().len(), 2);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScanConfig::load(dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn invalid_settings_prevent_building() {
    let config = ScanConfig::from_json(
        r#"{"target": "http://127.0.0.1:8545", "node_type": "parity",
            "plugins": [{"name": "ParityGasFloor", "settings": {"gas_floor": "lots"}}]}"#,
    )
    .unwrap();
    let err = config.build().unwrap_err();
    assert!(err.to_string().contains("ParityGasFloor"));
}
