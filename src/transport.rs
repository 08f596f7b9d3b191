//! HTTP 传输适配器
//!
//! 把 (方法, 路径, 查询串或请求体) 转换为解析后的 JSON，或统一的错误。
//! 无状态、可重入，可以同时发起多个请求。

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::{AppError, Result};

/// HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// 请求附带的数据
#[derive(Debug, Clone)]
pub enum Payload {
    /// 无
    Empty,
    /// 查询串参数
    Query(Vec<(String, String)>),
    /// JSON 请求体
    Json(Value),
}

/// Appends percent-encoded `key=value` pairs to `path`.
pub fn with_query<K, V>(path: &str, pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if pairs.is_empty() {
        return path.to_string();
    }

    let query = pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key.as_ref()),
                urlencoding::encode(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

/// 把 JSON 转换为具体类型，失败视为响应格式错误
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| AppError::MalformedResponse(e.to_string()))
}

/// 搜索服务的 HTTP 传输
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// 创建传输，`timeout` 为空表示不设超时
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 发起请求并返回解析后的 JSON
    ///
    /// - 无法连接：[`AppError::Connection`]
    /// - 非 2xx：[`AppError::Http`]，携带响应正文
    /// - 正文不是 JSON：[`AppError::MalformedResponse`]
    pub async fn call(&self, method: Method, path: &str, payload: Payload) -> Result<Value> {
        let url = match &payload {
            Payload::Query(pairs) => format!("{}{}", self.base_url, with_query(path, pairs)),
            _ => format!("{}{}", self.base_url, path),
        };
        debug!("{:?} {}", method, url);

        let builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = match payload {
            Payload::Json(body) => builder.json(&body),
            _ => builder,
        };

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("{:?} {} -> {}", method, url, status);
            return Err(AppError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AppError::MalformedResponse(e.to_string()))
    }

    /// GET 请求并解析为具体类型
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        let payload = if query.is_empty() {
            Payload::Empty
        } else {
            Payload::Query(query)
        };
        decode(self.call(Method::Get, path, payload).await?)
    }

    /// POST JSON 请求体并解析为具体类型
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        decode(self.call(Method::Post, path, Payload::Json(body)).await?)
    }
}
