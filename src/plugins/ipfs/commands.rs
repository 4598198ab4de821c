use crate::context::{Context, NodeType};
use crate::error::{CheckResult, PluginError};
use crate::plugin::{Plugin, PluginMetadata};
use crate::plugins::is_truthy;
use crate::reporting::{Issue, Severity};
use crate::rpc::{IpfsClient, IpfsRequest};
use serde_json::Value;

/// 已知的全部 API 命令路径
pub const ALL_COMMANDS: &[&[&str]] = &[
    &["refs"],
    &["refs", "local"],
    &["cid"],
    &["cid", "codecs"],
    &["cid", "hashes"],
    &["cid", "format"],
    &["cid", "base32"],
    &["cid", "bases"],
    &["dht"],
    &["dht", "put"],
    &["dht", "provide"],
    &["dht", "query"],
    &["dht", "findprovs"],
    &["dht", "findpeer"],
    &["dht", "get"],
    &["key"],
    &["key", "rm"],
    &["key", "rotate"],
    &["key", "gen"],
    &["key", "export"],
    &["key", "import"],
    &["key", "list"],
    &["key", "rename"],
    &["log"],
    &["log", "level"],
    &["log", "ls"],
    &["log", "tail"],
    &["p2p"],
    &["p2p", "close"],
    &["p2p", "ls"],
    &["p2p", "stream"],
    &["p2p", "stream", "ls"],
    &["p2p", "stream", "close"],
    &["p2p", "forward"],
    &["p2p", "listen"],
    &["ping"],
    &["cat"],
    &["dag"],
    &["dag", "stat"],
    &["dag", "put"],
    &["dag", "get"],
    &["dag", "resolve"],
    &["dag", "import"],
    &["dag", "export"],
    &["dns"],
    &["ls"],
    &["bitswap"],
    &["bitswap", "wantlist"],
    &["bitswap", "ledger"],
    &["bitswap", "reprovide"],
    &["bitswap", "stat"],
    &["resolve"],
    &["update"],
    &["shutdown"],
    &["block"],
    &["block", "stat"],
    &["block", "get"],
    &["block", "put"],
    &["block", "rm"],
    &["filestore"],
    &["filestore", "ls"],
    &["filestore", "verify"],
    &["filestore", "dups"],
    &["pubsub"],
    &["pubsub", "pub"],
    &["pubsub", "sub"],
    &["pubsub", "ls"],
    &["pubsub", "peers"],
    &["name"],
    &["name", "publish"],
    &["name", "resolve"],
    &["name", "pubsub"],
    &["name", "pubsub", "state"],
    &["name", "pubsub", "subs"],
    &["name", "pubsub", "cancel"],
    &["id"],
    &["mount"],
    &["files"],
    &["files", "ls"],
    &["files", "stat"],
    &["files", "rm"],
    &["files", "flush"],
    &["files", "read"],
    &["files", "write"],
    &["files", "mv"],
    &["files", "cp"],
    &["files", "mkdir"],
    &["files", "chcid"],
    &["repo"],
    &["repo", "verify"],
    &["repo", "stat"],
    &["repo", "gc"],
    &["repo", "fsck"],
    &["repo", "version"],
    &["config"],
    &["config", "show"],
    &["config", "edit"],
    &["config", "replace"],
    &["config", "profile"],
    &["config", "profile", "apply"],
    &["diag"],
    &["diag", "sys"],
    &["diag", "cmds"],
    &["diag", "cmds", "clear"],
    &["diag", "cmds", "set-time"],
    &["swarm"],
    &["swarm", "disconnect"],
    &["swarm", "filters"],
    &["swarm", "filters", "add"],
    &["swarm", "filters", "rm"],
    &["swarm", "peers"],
    &["swarm", "addrs"],
    &["swarm", "addrs", "local"],
    &["swarm", "addrs", "listen"],
    &["swarm", "connect"],
    &["urlstore"],
    &["urlstore", "add"],
    &["version"],
    &["version", "deps"],
    &["commands"],
    &["get"],
    &["bootstrap"],
    &["bootstrap", "list"],
    &["bootstrap", "add"],
    &["bootstrap", "add", "default"],
    &["bootstrap", "rm"],
    &["bootstrap", "rm", "all"],
    &["pin"],
    &["pin", "add"],
    &["pin", "rm"],
    &["pin", "ls"],
    &["pin", "verify"],
    &["pin", "update"],
    &["file"],
    &["file", "ls"],
    &["add"],
    &["stats"],
    &["stats", "bitswap"],
    &["stats", "dht"],
    &["stats", "bw"],
    &["stats", "repo"],
    &["object"],
    &["object", "diff"],
    &["object", "get"],
    &["object", "links"],
    &["object", "new"],
    &["object", "patch"],
    &["object", "patch", "append-data"],
    &["object", "patch", "add-link"],
    &["object", "patch", "rm-link"],
    &["object", "patch", "set-data"],
    &["object", "put"],
    &["object", "stat"],
    &["object", "data"],
    &["tar"],
    &["tar", "cat"],
    &["tar", "add"],
];

/// 一个命令路径，例如 `["p2p", "stream", "ls"]`
pub type CommandPath = Vec<String>;

/// 在 `/api/v0/commands` 返回的命令树中查找路径
fn lookup<'a>(tree: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let Some((head, rest)) = path.split_first() else {
        return Some(tree);
    };
    if !is_truthy(tree) {
        return None;
    }
    tree.get("Subcommands")?
        .as_array()?
        .iter()
        .find(|item| item.get("Name").and_then(Value::as_str) == Some(*head))
        .and_then(|item| lookup(item, rest))
}

fn contains(list: &[CommandPath], command: &[&str]) -> bool {
    list.iter()
        .any(|path| path.iter().map(String::as_str).eq(command.iter().copied()))
}

/// 检查节点是否开放了不允许的 API 命令
///
/// 两个列表都未给出时，禁止全部已知命令。两个列表不能有交集。
pub struct CommandCheck {
    metadata: PluginMetadata,
    client: IpfsClient,
    allowlist: Vec<CommandPath>,
    denylist: Vec<CommandPath>,
}

impl CommandCheck {
    pub fn new(
        allowlist: Option<Vec<CommandPath>>,
        denylist: Option<Vec<CommandPath>>,
    ) -> Result<Self, PluginError> {
        let (allowlist, denylist) = match (allowlist, denylist) {
            (None, None) => (Vec::new(), all_commands()),
            (allow, deny) => (allow.unwrap_or_default(), deny.unwrap_or_default()),
        };
        if allowlist.iter().any(|path| denylist.contains(path)) {
            return Err(PluginError::Config(
                "Must not have overlap between allow- and denylist".to_string(),
            ));
        }

        Ok(Self::with_lists(allowlist, denylist))
    }

    fn with_lists(allowlist: Vec<CommandPath>, denylist: Vec<CommandPath>) -> Self {
        Self {
            metadata: PluginMetadata::new(
                "CommandCheck",
                "Detect whether disallowed commands are enabled",
            )
            .with_property("severity", "high"),
            client: IpfsClient::new(),
            allowlist,
            denylist,
        }
    }

    fn forbidden(&self, command: &[&str]) -> bool {
        contains(&self.denylist, command) || !contains(&self.allowlist, command)
    }
}

impl Default for CommandCheck {
    fn default() -> Self {
        Self::with_lists(Vec::new(), all_commands())
    }
}

fn all_commands() -> Vec<CommandPath> {
    ALL_COMMANDS
        .iter()
        .map(|path| path.iter().map(|part| part.to_string()).collect())
        .collect()
}

impl Plugin for CommandCheck {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn check(&self, context: &mut Context) -> CheckResult {
        if context.node_type() != NodeType::Ipfs {
            return Ok(());
        }

        let payload = self
            .client
            .json(context.target(), &IpfsRequest::new("/api/v0/commands"))?;
        for command in ALL_COMMANDS {
            let Some(item) = lookup(&payload, command) else {
                continue;
            };
            if self.forbidden(command) {
                context.add_issue(
                    Issue::new(
                        "Forbidden Method is Exposed",
                        "A forbidden API method is open to the Internet. Attackers \
                         may be able to use the exposed functionality to cause undesired \
                         effects to the system.",
                        Severity::High,
                    )
                    .raw_data(item.clone()),
                )?;
            }
        }
        Ok(())
    }
}
