//! 核心数据模型模块
//!
//! 定义 DataSearch 的数据结构：SearchResult, EntityBag, NewDocumentPayload, FullDocument 等。

pub mod document;
pub mod search;

pub use document::*;
pub use search::*;
