// 根据名称和设置构造检查，供配置文件与命令行使用

use super::eth1::version::{GETH_RELEASES, PARITY_RELEASES};
use super::eth1;
use super::ipfs::{self, add, commands::CommandPath, logs, pins};
use crate::plugin::Plugin;
use anyhow::{bail, Context as _};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// 所有可以按名称构造的检查
pub const PLUGIN_NAMES: &[&str] = &[
    "AccountCreation",
    "GethAccountImport",
    "OpenAccounts",
    "AccountUnlock",
    "GethDatadir",
    "GethNodeInfo",
    "ParityDevLogs",
    "PeerlistLeak",
    "ParityUpgrade",
    "GethStartRPC",
    "GethStopRPC",
    "GethStartWebsocket",
    "GethStopWebsocket",
    "ParityGasCeiling",
    "ParityGasFloor",
    "ParityTxCeiling",
    "ParityMinGasPrice",
    "ParityChangeCoinbase",
    "ParityChangeTarget",
    "ParityChangeExtra",
    "ParitySyncMode",
    "MiningStatus",
    "HashrateStatus",
    "NetworkListening",
    "PeerCountStatus",
    "PeerlistManipulation",
    "ParityDropPeers",
    "SHA3Consistency",
    "NodeSync",
    "TxPoolContent",
    "GethTxPoolInspection",
    "GethTxPoolStatus",
    "ParityTxPoolStatistics",
    "NodeVersion",
    "Version",
    "DependencyVersion",
    "WebUIEnabled",
    "KeyLeaks",
    "AddPin",
    "EnumeratePins",
    "RemovePin",
    "Shutdown",
    "OpenUploadAdd",
    "CommandCheck",
    "CIDFSEnum",
    "UnixFSEnum",
    "FilestoreEnum",
    "P2PListListeners",
    "P2PListStreams",
    "P2PCloseStream",
    "P2PStopForwarding",
    "P2PEnableForwarding",
    "P2PCreateListener",
    "EnumerateLogs",
    "ReadLogs",
    "ChangeLogLevel",
];

#[derive(Debug, Deserialize)]
struct PasswordSettings {
    #[serde(default = "default_password")]
    password: String,
}

fn default_password() -> String {
    "doesnotmatter".to_string()
}

#[derive(Debug, Deserialize)]
struct ImportSettings {
    keydata: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceNodeSettings {
    infura_url: String,
}

#[derive(Debug, Deserialize)]
struct UnlockSettings {
    infura_url: String,
    #[serde(default)]
    wordlist: Vec<String>,
    #[serde(default)]
    skip_below: Option<u128>,
}

#[derive(Debug, Deserialize)]
struct SyncSettings {
    infura_url: String,
    #[serde(default = "default_block_threshold")]
    block_threshold: u128,
}

fn default_block_threshold() -> u128 {
    10
}

/// 只有一个数值参数的检查
#[derive(Debug, Deserialize)]
struct AmountSettings {
    #[serde(alias = "gas_target", alias = "gas_floor", alias = "gas_limit", alias = "gas_price")]
    #[serde(alias = "expected_hashrate", alias = "minimum_peercount")]
    value: u128,
}

/// 只有一个字符串参数的检查
#[derive(Debug, Deserialize)]
struct TextSettings {
    #[serde(alias = "author", alias = "target_chain", alias = "extra_data", alias = "mode")]
    #[serde(alias = "test_enode")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct MiningSettings {
    should_mine: bool,
}

#[derive(Debug, Deserialize)]
struct Sha3Settings {
    test_input: String,
    test_output: String,
}

#[derive(Debug, Deserialize)]
struct VersionSettings {
    #[serde(default = "default_geth_url")]
    geth_url: String,
    #[serde(default = "default_parity_url")]
    parity_url: String,
}

fn default_geth_url() -> String {
    GETH_RELEASES.to_string()
}

fn default_parity_url() -> String {
    PARITY_RELEASES.to_string()
}

#[derive(Debug, Deserialize)]
struct DependencySettings {
    #[serde(default = "enabled")]
    check_dependencies: bool,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct WebUISettings {
    #[serde(default = "default_webui_route")]
    route: String,
}

fn default_webui_route() -> String {
    "/webui".to_string()
}

#[derive(Debug, Deserialize)]
struct KeySettings {
    #[serde(default)]
    export: bool,
}

#[derive(Debug, Deserialize)]
struct PinSettings {
    #[serde(default = "default_cid", alias = "pin")]
    cid: String,
    #[serde(default = "enabled")]
    restore: bool,
}

fn default_cid() -> String {
    pins::DEFAULT_CID.to_string()
}

#[derive(Debug, Deserialize)]
struct UploadSettings {
    #[serde(default = "default_file_name")]
    file_name: String,
    #[serde(default = "default_file_content")]
    file_content: String,
}

fn default_file_name() -> String {
    add::DEFAULT_FILE_NAME.to_string()
}

fn default_file_content() -> String {
    add::DEFAULT_FILE_CONTENT.to_string()
}

#[derive(Debug, Deserialize)]
struct CommandSettings {
    #[serde(default)]
    allowlist: Option<Vec<CommandPath>>,
    #[serde(default)]
    denylist: Option<Vec<CommandPath>>,
}

#[derive(Debug, Deserialize)]
struct CidSettings {
    #[serde(default)]
    cid_paths: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PathSettings {
    #[serde(default = "default_path")]
    path: String,
}

fn default_path() -> String {
    "/".to_string()
}

#[derive(Debug, Deserialize)]
struct LogSettings {
    #[serde(default = "default_log_lines")]
    lines: usize,
}

fn default_log_lines() -> usize {
    logs::DEFAULT_LOG_LINES
}

#[derive(Debug, Deserialize)]
struct LogLevelSettings {
    #[serde(default = "default_subsystem")]
    subsystem: String,
    #[serde(default = "default_level")]
    level: String,
}

fn default_subsystem() -> String {
    "all".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

/// 解析检查的设置，`null` 视为空对象
fn settings<T: DeserializeOwned>(name: &str, value: &Value) -> anyhow::Result<T> {
    let value = match value {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };
    serde_json::from_value(value).with_context(|| format!("Invalid settings for plugin {}", name))
}

/// 按名称构造一个检查
pub fn build_plugin(name: &str, value: &Value) -> anyhow::Result<Box<dyn Plugin>> {
    let plugin: Box<dyn Plugin> = match name {
        "AccountCreation" => {
            let s: PasswordSettings = settings(name, value)?;
            Box::new(eth1::account_creation(&s.password))
        }
        "GethAccountImport" => {
            let s: ImportSettings = settings(name, value)?;
            Box::new(eth1::geth_account_import(&s.keydata, &s.password))
        }
        "OpenAccounts" => {
            let s: ReferenceNodeSettings = settings(name, value)?;
            Box::new(eth1::OpenAccounts::new(&s.infura_url))
        }
        "AccountUnlock" => {
            let s: UnlockSettings = settings(name, value)?;
            Box::new(eth1::AccountUnlock::new(&s.infura_url, s.wordlist, s.skip_below))
        }
        "GethDatadir" => Box::new(eth1::geth_datadir()),
        "GethNodeInfo" => Box::new(eth1::geth_node_info()),
        "ParityDevLogs" => Box::new(eth1::parity_dev_logs()),
        "PeerlistLeak" => Box::new(eth1::peerlist_leak()),
        "ParityUpgrade" => Box::new(eth1::parity_upgrade()),
        "GethStartRPC" => Box::new(eth1::geth_start_rpc()),
        "GethStopRPC" => Box::new(eth1::geth_stop_rpc()),
        "GethStartWebsocket" => Box::new(eth1::geth_start_websocket()),
        "GethStopWebsocket" => Box::new(eth1::geth_stop_websocket()),
        "ParityGasCeiling" => {
            let s: AmountSettings = settings(name, value)?;
            Box::new(eth1::parity_gas_ceiling(s.value))
        }
        "ParityGasFloor" => {
            let s: AmountSettings = settings(name, value)?;
            Box::new(eth1::parity_gas_floor(s.value))
        }
        "ParityTxCeiling" => {
            let s: AmountSettings = settings(name, value)?;
            Box::new(eth1::parity_tx_ceiling(s.value))
        }
        "ParityMinGasPrice" => {
            let s: AmountSettings = settings(name, value)?;
            Box::new(eth1::parity_min_gas_price(s.value))
        }
        "ParityChangeCoinbase" => {
            let s: TextSettings = settings(name, value)?;
            Box::new(eth1::parity_change_coinbase(&s.value))
        }
        "ParityChangeTarget" => {
            let s: TextSettings = settings(name, value)?;
            Box::new(eth1::parity_change_target(&s.value))
        }
        "ParityChangeExtra" => {
            let s: TextSettings = settings(name, value)?;
            Box::new(eth1::parity_change_extra(&s.value))
        }
        "ParitySyncMode" => {
            let s: TextSettings = settings(name, value)?;
            Box::new(eth1::parity_sync_mode(&s.value))
        }
        "MiningStatus" => {
            let s: MiningSettings = settings(name, value)?;
            Box::new(eth1::MiningStatus::new(s.should_mine))
        }
        "HashrateStatus" => {
            let s: AmountSettings = settings(name, value)?;
            Box::new(eth1::HashrateStatus::new(s.value))
        }
        "NetworkListening" => Box::new(eth1::NetworkListening::new()),
        "PeerCountStatus" => {
            let s: AmountSettings = settings(name, value)?;
            Box::new(eth1::PeerCountStatus::new(s.value))
        }
        "PeerlistManipulation" => {
            let s: TextSettings = settings(name, value)?;
            Box::new(eth1::peerlist_manipulation(&s.value))
        }
        "ParityDropPeers" => Box::new(eth1::parity_drop_peers()),
        "SHA3Consistency" => {
            let s: Sha3Settings = settings(name, value)?;
            Box::new(eth1::Sha3Consistency::new(&s.test_input, &s.test_output))
        }
        "NodeSync" => {
            let s: SyncSettings = settings(name, value)?;
            Box::new(eth1::NodeSync::new(&s.infura_url, s.block_threshold))
        }
        "TxPoolContent" => Box::new(eth1::tx_pool_content()),
        "GethTxPoolInspection" => Box::new(eth1::geth_tx_pool_inspection()),
        "GethTxPoolStatus" => Box::new(eth1::geth_tx_pool_status()),
        "ParityTxPoolStatistics" => Box::new(eth1::parity_tx_pool_statistics()),
        "NodeVersion" => {
            let s: VersionSettings = settings(name, value)?;
            Box::new(eth1::NodeVersion::with_release_urls(&s.geth_url, &s.parity_url))
        }
        "Version" => Box::new(ipfs::version()),
        "DependencyVersion" => {
            let s: DependencySettings = settings(name, value)?;
            Box::new(ipfs::DependencyVersion::new(s.check_dependencies))
        }
        "WebUIEnabled" => {
            let s: WebUISettings = settings(name, value)?;
            Box::new(ipfs::WebUIEnabled::new(&s.route))
        }
        "KeyLeaks" => {
            let s: KeySettings = settings(name, value)?;
            Box::new(ipfs::KeyLeaks::new(s.export))
        }
        "AddPin" => Box::new(ipfs::add_pin(&settings::<PinSettings>(name, value)?.cid)),
        "EnumeratePins" => Box::new(ipfs::enumerate_pins()),
        "RemovePin" => {
            let s: PinSettings = settings(name, value)?;
            Box::new(ipfs::RemovePin::new(&s.cid, s.restore))
        }
        "Shutdown" => Box::new(ipfs::shutdown()),
        "OpenUploadAdd" => {
            let s: UploadSettings = settings(name, value)?;
            Box::new(ipfs::open_upload_add(&s.file_name, &s.file_content))
        }
        "CommandCheck" => {
            let s: CommandSettings = settings(name, value)?;
            Box::new(
                ipfs::CommandCheck::new(s.allowlist, s.denylist)
                    .with_context(|| format!("Invalid settings for plugin {}", name))?,
            )
        }
        "CIDFSEnum" => {
            let s: CidSettings = settings(name, value)?;
            Box::new(ipfs::CIDFSEnum::new(s.cid_paths))
        }
        "UnixFSEnum" => Box::new(ipfs::unixfs_enum(&settings::<PathSettings>(name, value)?.path)),
        "FilestoreEnum" => Box::new(ipfs::filestore_enum()),
        "P2PListListeners" => Box::new(ipfs::p2p_list_listeners()),
        "P2PListStreams" => Box::new(ipfs::p2p_list_streams()),
        "P2PCloseStream" => Box::new(ipfs::p2p_close_stream()),
        "P2PStopForwarding" => Box::new(ipfs::p2p_stop_forwarding()),
        "P2PEnableForwarding" => Box::new(ipfs::p2p_enable_forwarding()),
        "P2PCreateListener" => Box::new(ipfs::p2p_create_listener()),
        "EnumerateLogs" => Box::new(ipfs::enumerate_logs()),
        "ReadLogs" => Box::new(ipfs::read_logs(settings::<LogSettings>(name, value)?.lines)),
        "ChangeLogLevel" => {
            let s: LogLevelSettings = settings(name, value)?;
            Box::new(ipfs::change_log_level(&s.subsystem, &s.level))
        }
        unknown => bail!("Unknown plugin: {}", unknown),
    };
    Ok(plugin)
}

/// 所有不需要额外设置即可构造的检查
pub fn catalogue() -> Vec<Box<dyn Plugin>> {
    PLUGIN_NAMES
        .iter()
        .filter_map(|name| build_plugin(name, &Value::Null).ok())
        .collect()
}
