//! 文档模型
//!
//! 录入表单提交的原始文档，以及后端分析后返回的完整文档。

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::search::{DocType, EntityBag};

/// 新文档载荷
///
/// ID 由后端分配，客户端从不提供。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocumentPayload {
    /// 标题
    pub title: String,
    /// 正文
    pub body: String,
    /// 来源
    pub source: String,
    /// 日期
    pub date: String,
}

impl NewDocumentPayload {
    /// 创建载荷，所有字段都会去除首尾空白
    pub fn new(title: &str, body: &str, source: &str, date: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            body: body.trim().to_string(),
            source: source.trim().to_string(),
            date: date.trim().to_string(),
        }
    }

    /// 返回第一个为空的必填字段
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("title", &self.title),
            ("body", &self.body),
            ("source", &self.source),
            ("date", &self.date),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    /// 验证所有字段非空
    pub fn validate(&self) -> Result<()> {
        match self.first_missing_field() {
            Some(field) => Err(AppError::Validation(format!("字段 '{}' 不能为空", field))),
            None => Ok(()),
        }
    }
}

/// 完整文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullDocument {
    /// 文档 ID
    pub id: String,
    /// 标题
    pub title: String,
    /// 正文
    pub body: String,
    /// 来源
    pub source: String,
    /// 日期
    pub date: String,
    /// 分类结果
    pub doc_type: DocType,
    /// 实体集合
    #[serde(default)]
    pub entities: EntityBag,
    /// 分词结果
    #[serde(default)]
    pub tokens: Vec<String>,
}

/// 后端健康状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// 状态
    pub status: String,
    /// 文档数量
    #[serde(default)]
    pub docs_count: u64,
}
