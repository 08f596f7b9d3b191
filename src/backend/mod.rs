//! 搜索后端
//!
//! 搜索和文档录入都通过 [`SearchBackend`] 进行。启动时根据配置选择一次实现：
//! 真实的 HTTP 后端，或者（仅在 `mock` 特性下）内存中的模拟后端。

pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::composer::SearchRequest;
use crate::config::config::BackendConfig;
use crate::error::Result;
use crate::models::{FullDocument, HealthStatus, NewDocumentPayload, SearchResult};
use crate::transport::HttpTransport;

pub use http::HttpBackend;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockBackend;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// 执行搜索
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>>;
    /// 提交新文档，返回后端分析后的完整文档
    async fn add_document(&self, payload: &NewDocumentPayload) -> Result<FullDocument>;
    /// 后端健康状态
    async fn health(&self) -> Result<HealthStatus>;
}

pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn SearchBackend>> {
    if config.use_mock {
        #[cfg(feature = "mock")]
        {
            tracing::info!("Using in-memory mock backend (delay: {}ms)", config.mock_delay_ms);
            let backend = MockBackend::with_fixtures(Duration::from_millis(config.mock_delay_ms));
            return Ok(Arc::new(backend));
        }
        #[cfg(not(feature = "mock"))]
        {
            return Err(crate::error::AppError::Config(
                "当前构建不包含模拟后端（需要 `mock` 特性）".into(),
            ));
        }
    }

    let transport = HttpTransport::new(&config.base_url, config.timeout_secs.map(Duration::from_secs))?;
    tracing::info!("Using search backend at {}", transport.base_url());
    Ok(Arc::new(HttpBackend::new(transport)))
}
