//! 文档录入表单状态

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::backend::SearchBackend;
use crate::error::Result;
use crate::models::{FullDocument, NewDocumentPayload};
use crate::render::Confirmation;

/// 文档录入表单
///
/// 提交失败时保留所有输入，方便用户直接重试。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestForm {
    pub title: String,
    pub body: String,
    pub source: String,
    pub date: String,
    /// 是否有提交正在进行
    pub submitting: bool,
    /// 错误信息
    pub error: Option<String>,
    /// 最近一次成功创建的文档
    pub created: Option<FullDocument>,
}

impl IngestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.payload().first_missing_field().is_none()
    }

    /// 当前输入对应的载荷（已去除首尾空白）
    pub fn payload(&self) -> NewDocumentPayload {
        NewDocumentPayload::new(&self.title, &self.body, &self.source, &self.date)
    }

    /// 开始提交，返回要发送的载荷
    pub fn begin_submit(&mut self) -> Option<NewDocumentPayload> {
        if !self.can_submit() {
            return None;
        }

        self.submitting = true;
        self.error = None;
        self.created = None;
        Some(self.payload())
    }

    /// 处理提交结果
    pub fn complete_submit(&mut self, outcome: Result<FullDocument>) {
        self.submitting = false;
        match outcome {
            Ok(document) => {
                info!("Document {} added", document.id);
                self.title.clear();
                self.body.clear();
                self.source.clear();
                self.date.clear();
                self.created = Some(document);
            }
            Err(e) => {
                warn!("Adding document failed: {}", e);
                self.error = Some(e.user_message());
            }
        }
    }

    /// 提交并等待结果，返回是否成功
    pub async fn submit(&mut self, backend: &dyn SearchBackend) -> bool {
        let Some(payload) = self.begin_submit() else {
            return false;
        };
        let outcome = backend.add_document(&payload).await;
        self.complete_submit(outcome);
        self.created.is_some()
    }

    /// 确认信息
    pub fn confirmation(&self) -> Option<Confirmation> {
        self.created.as_ref().map(Confirmation::from_document)
    }
}
