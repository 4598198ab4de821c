// 以太坊节点（Geth / Parity）的 JSON-RPC 检查

pub mod accounts;
pub mod admin;
pub mod exposure;
pub mod mining;
pub mod network;
pub mod parity_set;
pub mod sha3;
pub mod sync;
pub mod txpool;
pub mod version;

pub use accounts::{account_creation, geth_account_import, AccountUnlock, OpenAccounts};
pub use admin::{
    geth_datadir, geth_node_info, geth_start_rpc, geth_start_websocket, geth_stop_rpc,
    geth_stop_websocket, parity_dev_logs, parity_upgrade, peerlist_leak,
};
pub use exposure::{MethodExposure, Probe};
pub use mining::{HashrateStatus, MiningStatus};
pub use network::{parity_drop_peers, peerlist_manipulation, NetworkListening, PeerCountStatus};
pub use parity_set::{
    parity_change_coinbase, parity_change_extra, parity_change_target, parity_gas_ceiling,
    parity_gas_floor, parity_min_gas_price, parity_sync_mode, parity_tx_ceiling,
};
pub use sha3::Sha3Consistency;
pub use sync::NodeSync;
pub use txpool::{
    geth_tx_pool_inspection, geth_tx_pool_status, parity_tx_pool_statistics, tx_pool_content,
};
pub use version::NodeVersion;

