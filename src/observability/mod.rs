//! 可观测性模块
//!
//! 结构化日志初始化。日志写到 stderr，stdout 只用于渲染结果。

use tracing_subscriber::EnvFilter;

use crate::config::config::LoggingConfig;

/// 根据配置构造过滤器，`RUST_LOG` 优先
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// 初始化全局日志订阅者
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already initialized");
    }
}
