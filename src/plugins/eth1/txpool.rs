// 交易池相关的信息泄露检查

use super::exposure::{MethodExposure, Probe};
use crate::plugin::PluginMetadata;
use crate::plugins::{Finding, GETH, PARITY};
use crate::reporting::Severity;

fn low(name: &str, description: &str, probes: Vec<Probe>) -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new(name, description).with_property("severity", "low"),
        probes,
    )
}

pub fn tx_pool_content() -> MethodExposure {
    low(
        "TxPoolContent",
        "Try to fetch the transaction pool contents",
        vec![
            Probe::new(
                GETH,
                "txpool_content",
                Finding::new(
                    "TxPool Content",
                    "Anyone can see the transcation pool contents using the txpool_content RPC call.",
                    Severity::Low,
                ),
            ),
            Probe::new(
                PARITY,
                "parity_pendingTransactions",
                Finding::new(
                    "TxPool Content",
                    "Anyone can see the transaction pool contents using the parity_pendingTransactions RPC call.",
                    Severity::Low,
                ),
            ),
        ],
    )
}

pub fn geth_tx_pool_inspection() -> MethodExposure {
    low(
        "GethTxPoolInspection",
        "Try to inspect the transaction pool",
        vec![Probe::new(
            GETH,
            "txpool_inspect",
            Finding::new(
                "TxPool Inspection",
                "Anyone can inspect the transaction pool using the txpool_inspect RPC call.",
                Severity::Low,
            ),
        )],
    )
}

pub fn geth_tx_pool_status() -> MethodExposure {
    low(
        "GethTxPoolStatus",
        "Try to fetch the transaction pool status",
        vec![Probe::new(
            GETH,
            "txpool_status",
            Finding::new(
                "TxPool Status",
                "Anyone can see the transaction pool status using the txpool_status RPC call.",
                Severity::Low,
            ),
        )],
    )
}

pub fn parity_tx_pool_statistics() -> MethodExposure {
    low(
        "ParityTxPoolStatistics",
        "Try to fetch the transaction pool statistics",
        vec![Probe::new(
            PARITY,
            "parity_pendingTransactionsStats",
            Finding::new(
                "TxPool Statistics",
                "Anyone can see the transaction pool statistics using the parity_pendingTransactionsStats RPC call.",
                Severity::Low,
            ),
        )],
    )
}
