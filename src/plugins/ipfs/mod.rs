// IPFS 节点的 HTTP API 检查，所有检查都会跳过非 IPFS 节点

pub mod add;
pub mod commands;
pub mod exposure;
pub mod files;
pub mod keys;
pub mod logs;
pub mod p2p;
pub mod pins;
pub mod shutdown;
pub mod version;
pub mod webui;

pub use add::open_upload_add;
pub use commands::CommandCheck;
pub use exposure::RouteExposure;
pub use files::{filestore_enum, unixfs_enum, CIDFSEnum};
pub use keys::KeyLeaks;
pub use logs::{change_log_level, enumerate_logs, read_logs};
pub use p2p::{
    p2p_close_stream, p2p_create_listener, p2p_enable_forwarding, p2p_list_listeners,
    p2p_list_streams, p2p_stop_forwarding,
};
pub use pins::{add_pin, enumerate_pins, RemovePin};
pub use shutdown::shutdown;
pub use version::{version, DependencyVersion};
pub use webui::WebUIEnabled;
