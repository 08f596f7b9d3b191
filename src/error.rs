//! 错误处理模块
//!
//! 定义客户端的错误类型，以及错误在界面上显示的文本。

use thiserror::Error;

/// 无法连接后端时显示的通用提示
pub const CONNECTION_ERROR_MESSAGE: &str = "Помилка з'єднання з сервером";

/// 响应无法解析时显示的通用提示
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Помилка запиту";

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 必填字段为空
    #[error("参数验证失败: {0}")]
    Validation(String),

    /// 无法连接到后端
    #[error("连接错误: {0}")]
    Connection(String),

    /// 后端返回非 2xx 状态码
    #[error("HTTP 错误 {status}: {body}")]
    Http {
        /// 状态码
        status: u16,
        /// 响应正文（可能为空）
        body: String,
    },

    /// 响应不是合法的 JSON，或与期望的结构不符
    #[error("响应格式错误: {0}")]
    MalformedResponse(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl AppError {
    /// 在界面上显示给用户的文本
    ///
    /// Backend rejections show the response body verbatim, falling back to
    /// `HTTP error <status>` when the body is empty.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Http { status, body } => {
                if body.is_empty() {
                    format!("HTTP error {}", status)
                } else {
                    body.clone()
                }
            }
            AppError::Connection(_) => CONNECTION_ERROR_MESSAGE.to_string(),
            AppError::MalformedResponse(_) => MALFORMED_RESPONSE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::MalformedResponse(e.to_string())
        } else {
            AppError::Connection(e.to_string())
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
