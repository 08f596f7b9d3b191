//! DataSearch - 文档搜索服务的交互式客户端
//!
//! 组合搜索请求（查询文本与分面过滤），渲染带有命名实体的排序结果，
//! 并向后端提交新文档进行分析。

pub mod backend;
pub mod cli;
pub mod composer;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod preferences;
pub mod render;
pub mod screens;
pub mod transport;
