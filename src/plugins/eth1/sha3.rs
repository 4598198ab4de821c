use crate::context::Context;
use crate::error::CheckResult;
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::ETH1;
use crate::reporting::{Issue, Severity};
use crate::rpc::JsonRpcClient;
use serde_json::json;

/// 让节点计算给定输入的 SHA3，并与期望的输出比较（`web3_sha3`）
pub struct Sha3Consistency {
    metadata: PluginMetadata,
    rpc: JsonRpcClient,
    test_input: String,
    test_output: String,
}

impl Sha3Consistency {
    pub fn new(test_input: &str, test_output: &str) -> Self {
        Self {
            metadata: PluginMetadata::new("SHA3Consistency", "Check for SHA3 consistency")
                .with_property("severity", "critical"),
            rpc: JsonRpcClient::new(),
            test_input: test_input.to_string(),
            test_output: test_output.to_string(),
        }
    }
}

impl Plugin for Sha3Consistency {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if !ETH1.contains(&context.node_type()) {
            return Ok(());
        }

        let sha_hash = self
            .rpc
            .call(context.target(), "web3_sha3", vec![json!(self.test_input)])?;
        let received = match sha_hash.as_str() {
            Some(hash) => hash.to_string(),
            None => sha_hash.to_string(),
        };
        if received != self.test_output {
            context.add_issue(
                Issue::new(
                    "SHA3 test failed",
                    format!("Expected {} but received {}", self.test_output, received),
                    Severity::Critical,
                )
                .raw_data(sha_hash),
            )?;
        }
        Ok(())
    }
}
