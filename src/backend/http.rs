//! HTTP 搜索后端

use async_trait::async_trait;

use crate::backend::SearchBackend;
use crate::composer::{SEARCH_PATH, SearchRequest};
use crate::error::Result;
use crate::models::{FullDocument, HealthStatus, NewDocumentPayload, SearchResult};
use crate::transport::HttpTransport;

/// 文档录入接口路径
pub const DOCUMENTS_PATH: &str = "/admin/documents";

/// 健康检查接口路径
pub const HEALTH_PATH: &str = "/";

pub struct HttpBackend {
    transport: HttpTransport,
}

impl HttpBackend {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        tracing::debug!("Searching: {:?}", request);
        let results: Vec<SearchResult> = self
            .transport
            .get_json(SEARCH_PATH, request.to_query())
            .await?;
        tracing::debug!("Search returned {} results", results.len());
        Ok(results)
    }

    async fn add_document(&self, payload: &NewDocumentPayload) -> Result<FullDocument> {
        tracing::info!("Submitting document: {}", payload.title);
        let document: FullDocument = self.transport.post_json(DOCUMENTS_PATH, payload).await?;
        tracing::info!("Document created: {} (type: {})", document.id, document.doc_type);
        Ok(document)
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.transport.get_json(HEALTH_PATH, Vec::new()).await
    }
}
