use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "DATASEARCH_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. 内置默认值
    /// 2. ./datasearch.toml
    /// 3. 环境变量
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        let base_url = config.backend.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::MissingBaseUrl);
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        if config.backend.use_mock && !cfg!(feature = "mock") {
            return Err(ConfigValidationError::MockUnavailable);
        }

        if config.backend.timeout_secs == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("后端地址未配置")]
    MissingBaseUrl,

    #[error("后端地址必须以 http:// 或 https:// 开头: {0}")]
    InvalidBaseUrl(String),

    #[error("当前构建不包含模拟后端（需要 `mock` 特性）")]
    MockUnavailable,

    #[error("请求超时无效，必须大于 0")]
    InvalidTimeout,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("datasearch.toml")
}
