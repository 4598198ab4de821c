// 扫描结果的数据模型

pub mod issue;
pub mod report;

pub use issue::{Issue, Severity};
pub use report::Report;
