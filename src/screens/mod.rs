//! 界面状态模块
//!
//! 每个界面的状态都是显式的、可序列化的结构体，与具体的渲染方式无关。

pub mod ingest;
pub mod search;

pub use ingest::IngestForm;
pub use search::{PendingSearch, SearchScreen};
