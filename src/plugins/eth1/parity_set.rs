// parity_set 模块：修改挖矿与交易参数

use super::exposure::{MethodExposure, Probe};
use crate::plugin::PluginMetadata;
use crate::plugins::{Finding, PARITY};
use crate::reporting::Severity;
use serde_json::{json, Value};

fn parity_setter(
    name: &str,
    description: &str,
    method: &'static str,
    param: Value,
    finding: Finding,
) -> MethodExposure {
    let severity = finding.severity.as_str().to_string();
    MethodExposure::new(
        PluginMetadata::new(name, description)
            .intrusive(true)
            .with_property("severity", &severity),
        vec![Probe::new(PARITY, method, finding).params(vec![param])],
    )
}

fn hex(value: u128) -> Value {
    json!(format!("{:#x}", value))
}

pub fn parity_gas_ceiling(gas_target: u128) -> MethodExposure {
    parity_setter(
        "ParityGasCeiling",
        "Try to set a new gas ceiling target for mined blocks",
        "parity_setGasCeilTarget",
        hex(gas_target),
        Finding::new(
            "Gas ceiling target can be changed",
            "Anyone can change the gas ceiling value using the parity_setGasCeilTarget RPC call.",
            Severity::Critical,
        ),
    )
}

pub fn parity_gas_floor(gas_floor: u128) -> MethodExposure {
    parity_setter(
        "ParityGasFloor",
        "Try to set a new gas floor target for mined blocks",
        "parity_setGasFloorTarget",
        hex(gas_floor),
        Finding::new(
            "Gas floor target can be changed",
            "Anyone can change the gas floor value using the parity_setGasFloorTarget RPC call.",
            Severity::Critical,
        ),
    )
}

pub fn parity_tx_ceiling(gas_limit: u128) -> MethodExposure {
    parity_setter(
        "ParityTxCeiling",
        "Try to set the maximum transaction gas",
        "parity_setMaxTransactionGas",
        hex(gas_limit),
        Finding::new(
            "Transaction maximum gas can be changed",
            "Anyone can change the maximum transaction gas limit using the parity_setMaxTransactionGas RPC call.",
            Severity::Critical,
        ),
    )
    .only_if_truthy()
}

pub fn parity_min_gas_price(gas_price: u128) -> MethodExposure {
    parity_setter(
        "ParityMinGasPrice",
        "Try to set the minimum transaction gas price",
        "parity_setMinGasPrice",
        hex(gas_price),
        Finding::new(
            "Transaction minimum gas can be changed",
            "Anyone can change the minimum transaction gas limit using the parity_setMinGasPrice RPC call.",
            Severity::Critical,
        ),
    )
    .only_if_truthy()
}

/// 尝试修改出块奖励地址
pub fn parity_change_coinbase(author: &str) -> MethodExposure {
    parity_setter(
        "ParityChangeCoinbase",
        "Try to change the coinbase address",
        "parity_setAuthor",
        json!(author),
        Finding::new(
            "Coinbase address change possible",
            "Anyone can change the coinbase address and redirect miner payouts using the parity_setAuthor RPC call.",
            Severity::Critical,
        ),
    )
}

pub fn parity_change_target(target_chain: &str) -> MethodExposure {
    parity_setter(
        "ParityChangeTarget",
        "Try to change the target chain",
        "parity_setChain",
        json!(target_chain),
        Finding::new(
            "Chain preset change possible",
            "Anyone can change the node's target chain value using the parity_setChain RPC call.",
            Severity::Critical,
        ),
    )
}

pub fn parity_change_extra(extra_data: &str) -> MethodExposure {
    parity_setter(
        "ParityChangeExtra",
        "Try to set the extra data field",
        "parity_setExtraData",
        json!(extra_data),
        Finding::new(
            "Extra data change possible",
            "Anyone can change the extra data attached to newly mined blocks using the parity_setExtraData RPC call.",
            Severity::Low,
        ),
    )
}

pub fn parity_sync_mode(mode: &str) -> MethodExposure {
    parity_setter(
        "ParitySyncMode",
        "Try to set the node's sync mode",
        "parity_setMode",
        json!(mode),
        Finding::new(
            "The sync mode can be changed",
            "Anyone can change the node's sync mode using the parity_setMode RPC call.",
            Severity::Critical,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_values_are_hex_encoded() {
        assert_eq!(hex(1000), json!("0x3e8"));
        assert_eq!(hex(0), json!("0x0"));
    }
}
