//! 查询组合
//!
//! 把用户输入的查询文本和分面选择规范化为搜索请求。

use serde::{Deserialize, Serialize};

use crate::transport::with_query;

/// 搜索接口路径
pub const SEARCH_PATH: &str = "/search";

/// UI value meaning "no filter selected". Never sent on the wire.
pub const ALL: &str = "all";

/// 搜索请求
///
/// 只有选择了具体值的分面才会出现在请求中。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// 查询文本（已去除首尾空白，非空）
    #[serde(rename = "q")]
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_value: Option<String>,
}

impl SearchRequest {
    /// Query-string pairs in wire order: `q`, `doc_type`, `entity_type`, `entity_value`.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("q", self.query.as_str())];
        if let Some(doc_type) = &self.doc_type {
            pairs.push(("doc_type", doc_type));
        }
        if let Some(entity_type) = &self.entity_type {
            pairs.push(("entity_type", entity_type));
        }
        if let Some(entity_value) = &self.entity_value {
            pairs.push(("entity_value", entity_value));
        }
        pairs
    }

    /// 带百分号编码查询串的请求路径
    pub fn path(&self) -> String {
        with_query(SEARCH_PATH, &self.query_pairs())
    }

    /// Owned pairs for [`crate::transport::Payload::Query`].
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.query_pairs()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

/// 查询是否可以提交
pub fn is_submittable(query: &str) -> bool {
    !query.trim().is_empty()
}

/// 组合搜索请求
///
/// Returns `None` when the trimmed query is empty; the caller must not issue
/// a request in that case. Facets equal to [`ALL`] are omitted, every other
/// value is passed through unmodified.
pub fn build_request(
    query: &str,
    selected_doc_type: &str,
    selected_entity_type: &str,
    selected_entity_value: Option<&str>,
) -> Option<SearchRequest> {
    if !is_submittable(query) {
        return None;
    }

    Some(SearchRequest {
        query: query.trim().to_string(),
        doc_type: facet(selected_doc_type),
        entity_type: facet(selected_entity_type),
        entity_value: selected_entity_value.and_then(facet),
    })
}

/// 空白选择与 "all" 一样视为未选择
fn facet(selected: &str) -> Option<String> {
    if selected == ALL || selected.trim().is_empty() {
        None
    } else {
        Some(selected.to_string())
    }
}
