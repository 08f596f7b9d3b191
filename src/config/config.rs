use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认后端地址
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// 后端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// 搜索服务地址
    pub base_url: String,
    /// 使用内存中的模拟后端（需要 `mock` 特性）
    pub use_mock: bool,
    /// 模拟后端的人为延迟（毫秒）
    pub mock_delay_ms: u64,
    /// 请求超时（秒），为空表示不设超时
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            use_mock: false,
            mock_delay_ms: 600,
            timeout_secs: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            structured: false,
        }
    }
}

/// 偏好设置配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PreferencesConfig {
    /// 偏好文件路径，为空时使用系统配置目录
    pub path: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 后端配置
    pub backend: BackendConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 偏好设置配置
    pub preferences: PreferencesConfig,
}
