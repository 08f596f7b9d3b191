//! 模拟后端
//!
//! 仅用于本地开发和测试：内存中的固定数据、人为延迟，
//! 以及对标题和摘要的大小写无关子串过滤。

use async_trait::async_trait;
use parking_lot::RwLock;
use std::time::Duration;

use crate::backend::SearchBackend;
use crate::composer::SearchRequest;
use crate::error::Result;
use crate::models::{
    DocType, EntityBag, FullDocument, HealthStatus, NewDocumentPayload, SearchResult,
};

const SNIPPET_CHARS: usize = 200;

pub struct MockBackend {
    fixtures: Vec<SearchResult>,
    added: RwLock<Vec<FullDocument>>,
    delay: Duration,
}

impl MockBackend {
    pub fn new(fixtures: Vec<SearchResult>, delay: Duration) -> Self {
        Self {
            fixtures,
            added: RwLock::new(Vec::new()),
            delay,
        }
    }

    /// 使用内置示例数据
    pub fn with_fixtures(delay: Duration) -> Self {
        Self::new(fixtures(), delay)
    }

    /// 本次会话中添加的文档
    pub fn added_documents(&self) -> Vec<FullDocument> {
        self.added.read().clone()
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn matches_query(result: &SearchResult, needle: &str) -> bool {
    needle.is_empty()
        || result.title.to_lowercase().contains(needle)
        || result.snippet.to_lowercase().contains(needle)
}

fn to_result(document: &FullDocument) -> SearchResult {
    SearchResult {
        id: document.id.clone(),
        title: document.title.clone(),
        snippet: document.body.chars().take(SNIPPET_CHARS).collect(),
        score: 1.0,
        doc_type: document.doc_type.clone(),
        entities: document.entities.clone(),
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
        self.pause().await;

        let needle = request.query.trim().to_lowercase();
        let added = self.added.read();
        let results: Vec<SearchResult> = self
            .fixtures
            .iter()
            .cloned()
            .chain(added.iter().map(to_result))
            .filter(|result| matches_query(result, &needle))
            .collect();

        tracing::debug!("Mock search '{}' matched {} results", needle, results.len());
        Ok(results)
    }

    async fn add_document(&self, payload: &NewDocumentPayload) -> Result<FullDocument> {
        payload.validate()?;
        self.pause().await;

        let document = FullDocument {
            id: uuid::Uuid::new_v4().to_string(),
            title: payload.title.clone(),
            body: payload.body.clone(),
            source: payload.source.clone(),
            date: payload.date.clone(),
            doc_type: DocType::News,
            entities: EntityBag::default(),
            tokens: payload
                .body
                .split_whitespace()
                .map(|token| token.to_lowercase())
                .collect(),
        };

        self.added.write().push(document.clone());
        tracing::info!("Mock backend stored document {}", document.id);
        Ok(document)
    }

    async fn health(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: "ok".to_string(),
            docs_count: (self.fixtures.len() + self.added.read().len()) as u64,
        })
    }
}

fn entities(per: &[&str], org: &[&str], loc: &[&str], date: &[&str]) -> EntityBag {
    let owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect();
    EntityBag {
        per: owned(per),
        org: owned(org),
        loc: owned(loc),
        date: owned(date),
    }
}

/// 内置示例数据
pub fn fixtures() -> Vec<SearchResult> {
    vec![
        SearchResult {
            id: "mock-1".into(),
            title: "Київський університет оголосив набір на нові програми".into(),
            snippet: "Київський національний університет імені Тараса Шевченка оголосив набір студентів на магістерські програми з аналізу даних.".into(),
            score: 3.4172,
            doc_type: DocType::News,
            entities: entities(
                &["Тарас Шевченко"],
                &["Київський національний університет"],
                &["Київ"],
                &["2024"],
            ),
        },
        SearchResult {
            id: "mock-2".into(),
            title: "Чому відкриті дані важливі для громад".into(),
            snippet: "Колонка про те, як відкриті дані допомагають місцевим громадам ухвалювати рішення.".into(),
            score: 2.0981,
            doc_type: DocType::Opinion,
            entities: entities(&[], &[], &["Львів", "Одеса"], &[]),
        },
        SearchResult {
            id: "mock-3".into(),
            title: "Моделі розпізнавання іменованих сутностей для української мови".into(),
            snippet: "Дослідження порівнює підходи до розпізнавання сутностей PER, ORG, LOC та DATE на корпусі новин.".into(),
            score: 1.5563,
            doc_type: DocType::Scientific,
            entities: entities(&[], &["НАН України"], &[], &["2023-11-02"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::{ALL, build_request};
    use crate::error::AppError;

    fn backend() -> MockBackend {
        MockBackend::with_fixtures(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_mock_search_filters_title_and_snippet() {
        let backend = backend();

        let request = build_request("УНІВЕРСИТЕТ", ALL, ALL, None).unwrap();
        let results = backend.search(&request).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "mock-1");

        let request = build_request("громад", ALL, ALL, None).unwrap();
        let results = backend.search(&request).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "mock-2");
    }

    #[tokio::test]
    async fn test_mock_search_without_match_is_empty() {
        let backend = backend();
        let request = build_request("квантова гравітація", ALL, ALL, None).unwrap();

        assert!(backend.search(&request).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_added_document_is_searchable() {
        let backend = backend();
        let payload = NewDocumentPayload::new("Нова стаття", "Текст про бібліотеки", "S", "2024-01-01");

        let document = backend.add_document(&payload).await.unwrap();
        assert_eq!(document.title, "Нова стаття");
        assert_eq!(document.tokens, vec!["текст", "про", "бібліотеки"]);
        assert_eq!(backend.added_documents().len(), 1);

        let request = build_request("бібліотеки", ALL, ALL, None).unwrap();
        let results = backend.search(&request).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, document.id);

        assert_eq!(backend.health().await.unwrap().docs_count, 4);
    }

    #[tokio::test]
    async fn test_mock_rejects_empty_fields() {
        let backend = backend();
        let payload = NewDocumentPayload::new("T", "", "S", "D");

        let err = backend.add_document(&payload).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(backend.added_documents().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_delay_is_applied() {
        let backend = MockBackend::with_fixtures(Duration::from_millis(600));
        let request = build_request("дані", ALL, ALL, None).unwrap();

        let started = tokio::time::Instant::now();
        backend.search(&request).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(600));
    }
}
