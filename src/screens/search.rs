//! 搜索界面状态

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::backend::SearchBackend;
use crate::composer::{self, ALL, SearchRequest};
use crate::error::Result;
use crate::models::SearchResult;
use crate::render::{self, ResultsView};

/// 已发出、尚未完成的搜索
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// 序列号
    pub seq: u64,
    pub request: SearchRequest,
}

/// 搜索界面状态
///
/// Every issued search gets a monotonically increasing sequence number; a
/// response whose number is not the latest issued is discarded so a stale
/// response never overwrites a fresher one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchScreen {
    /// 查询文本
    pub query: String,
    /// 文档类型选择
    pub doc_type: String,
    /// 实体类型选择
    pub entity_type: String,
    /// 实体值
    pub entity_value: String,
    /// 是否在等待最新一次搜索
    pub loading: bool,
    /// 结果列表
    pub results: Vec<SearchResult>,
    /// 错误信息
    pub error: Option<String>,
    /// 最近一次发出的序列号
    latest_seq: u64,
}

impl Default for SearchScreen {
    fn default() -> Self {
        Self {
            query: String::new(),
            doc_type: ALL.to_string(),
            entity_type: ALL.to_string(),
            entity_value: String::new(),
            loading: false,
            results: Vec::new(),
            error: None,
            latest_seq: 0,
        }
    }
}

impl SearchScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// 搜索按钮是否可用
    pub fn can_search(&self) -> bool {
        !self.loading && composer::is_submittable(&self.query)
    }

    /// 根据当前输入组合请求
    pub fn request(&self) -> Option<SearchRequest> {
        composer::build_request(
            &self.query,
            &self.doc_type,
            &self.entity_type,
            Some(&self.entity_value),
        )
    }

    /// 发起一次搜索
    ///
    /// Only requires a submittable query, so a search may be issued while an
    /// earlier one is still outstanding; button-driven callers check
    /// [`SearchScreen::can_search`] first.
    pub fn begin_search(&mut self) -> Option<PendingSearch> {
        let request = self.request()?;

        self.latest_seq += 1;
        self.loading = true;
        self.error = None;

        Some(PendingSearch {
            seq: self.latest_seq,
            request,
        })
    }

    /// 处理搜索响应，返回是否被采用
    pub fn complete_search(&mut self, seq: u64, outcome: Result<Vec<SearchResult>>) -> bool {
        if seq != self.latest_seq {
            warn!(
                "Discarding stale search response #{} (latest #{})",
                seq, self.latest_seq
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(results) => {
                info!("Search #{} returned {} results", seq, results.len());
                self.results = results;
                self.error = None;
            }
            Err(e) => {
                warn!("Search #{} failed: {}", seq, e);
                self.results.clear();
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// 发起搜索并等待结果
    pub async fn submit(&mut self, backend: &dyn SearchBackend) -> bool {
        let Some(pending) = self.begin_search() else {
            return false;
        };
        let outcome = backend.search(&pending.request).await;
        self.complete_search(pending.seq, outcome)
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// 结果区域视图
    pub fn view(&self) -> ResultsView {
        render::render_results(self)
    }
}
