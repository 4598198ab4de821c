use super::exposure::{MethodExposure, Probe};
use crate::context::Context;
use crate::error::{CheckResult, PluginError};
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::{Finding, ETH1, GETH};
use crate::reporting::{Issue, Severity};
use crate::rpc::JsonRpcClient;
use serde_json::{json, Value};
use tracing::debug;

/// 检测是否可以在节点上创建新账户（`personal_newAccount`）
pub fn account_creation(test_password: &str) -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new("AccountCreation", "Detect account creation weaknesses")
            .intrusive(true)
            .with_property("severity", "medium"),
        vec![Probe::new(
            ETH1,
            "personal_newAccount",
            Finding::new(
                "We managed to create a new account on your node",
                "A new account can be generated on the node itself using the personal_newAccount RPC call.",
                Severity::Medium,
            ),
        )
        .params(vec![json!(test_password)])],
    )
}

/// 检测是否可以通过 `personal_importRawKey` 导入私钥（仅 Geth）
pub fn geth_account_import(keydata: &str, password: &str) -> MethodExposure {
    MethodExposure::new(
        PluginMetadata::new(
            "GethAccountImport",
            "Detect whether it's possible to import an account on the node",
        )
        .intrusive(true)
        .with_property("severity", "medium"),
        vec![Probe::new(
            GETH,
            "personal_importRawKey",
            Finding::new(
                "We managed to import an account on your node",
                "A private key can be imported on the node to initialize an account using the personal_importRawKey RPC call.",
                Severity::Medium,
            ),
        )
        .params(vec![json!(keydata), json!(password)])],
    )
}

fn accounts(rpc: &JsonRpcClient, target: &str) -> Result<Vec<String>, PluginError> {
    match rpc.call(target, "eth_accounts", Vec::new())? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()),
        other => Err(PluginError::Decode(format!("expected account list, got {}", other))),
    }
}

/// 列出节点上注册的账户，并通过参考节点查询余额
pub struct OpenAccounts {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
    infura_url: String,
}

impl OpenAccounts {
    pub fn new(infura_url: &str) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "OpenAccounts",
                "Check for any accounts registered on the node",
            )
            .with_property("severity", "medium"),
            rpc: JsonRpcClient::new(),
            infura_url: infura_url.to_string(),
        }
    }
}

impl Plugin for OpenAccounts {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if !ETH1.contains(&context.node_type()) {
            return Ok(());
        }

        for account in accounts(&self.rpc, context.target())? {
            let balance = self.rpc.call_int(
                &self.infura_url,
                "eth_getBalance",
                vec![json!(account), json!("latest")],
            )?;
            context.add_issue(
                Issue::new(
                    "Found account",
                    format!("Account: {} Balance: {}", account, balance),
                    Severity::Medium,
                )
                .raw_data(account),
            )?;
        }
        Ok(())
    }
}

/// 用字典尝试解锁节点上的账户
///
/// 每个账户只解锁一秒。可以跳过余额低于 `skip_below` 的账户。
pub struct AccountUnlock {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
    infura_url: String,
    wordlist: Vec<String>,
    skip_below: Option<u128>,
}

impl AccountUnlock {
    pub fn new(infura_url: &str, wordlist: Vec<String>, skip_below: Option<u128>) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "AccountUnlock",
                "Check whether any accounts on the node are weakly protected",
            )
            .intrusive(true)
            .with_property("severity", "critical"),
            rpc: JsonRpcClient::new(),
            infura_url: infura_url.to_string(),
            wordlist,
            skip_below,
        }
    }

    pub fn with_client(mut self, rpc: JsonRpcClient) -> Self {
        self.rpc = rpc;
        self
    }
}

impl Plugin for AccountUnlock {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if !ETH1.contains(&context.node_type()) {
            return Ok(());
        }

        for account in accounts(&self.rpc, context.target())? {
            let balance = self.rpc.call_int(
                &self.infura_url,
                "eth_getBalance",
                vec![json!(account), json!("latest")],
            )?;
            if let Some(minimum) = self.skip_below {
                if balance < minimum {
                    debug!("Skipping {} because balance {} < {}", account, balance, minimum);
                    continue;
                }
            }

            debug!("Trying passwords with {} with balance {}", account, balance);
            for password in &self.wordlist {
                let payload = match self.rpc.call(
                    context.target(),
                    "personal_unlockAccount",
                    vec![json!(account), json!(password), json!(1)],
                ) {
                    Ok(payload) => payload,
                    Err(PluginError::Rpc(message)) if message == "Method not found" => {
                        debug!("Aborting wordlist attack because method is not supported");
                        break;
                    }
                    Err(_) => continue,
                };

                context.add_issue(
                    Issue::new(
                        "Weak password detected!",
                        format!(
                            "The account ({}) is only protected by a weak password ({})",
                            account, password
                        ),
                        Severity::Critical,
                    )
                    .raw_data(payload),
                )?;
            }
        }
        Ok(())
    }
}
