//! 偏好设置
//!
//! 目前只有界面主题一项，跨会话持久化。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, Result};

const PREFERENCES_FILE: &str = "preferences.json";

/// 界面主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "theme-light")]
    Light,
    #[serde(rename = "theme-dark")]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" | "theme-light" => Ok(Theme::Light),
            "dark" | "theme-dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default, deserialize_with = "lenient_theme")]
    theme: Theme,
}

fn lenient_theme<'de, D>(deserializer: D) -> std::result::Result<Theme, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()).unwrap_or_default())
}

/// 偏好文件存储
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 使用配置的路径，未配置时使用系统配置目录
    pub fn from_config(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(default_preferences_path()?)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取主题，文件缺失或内容无法识别时为浅色
    pub fn load_theme(&self) -> Theme {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return Theme::default(),
        };

        match serde_json::from_str::<StoredPreferences>(&contents) {
            Ok(stored) => stored.theme,
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences {}: {}", self.path.display(), e);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&StoredPreferences { theme })?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("Saved theme {} to {}", theme, self.path.display());
        Ok(())
    }

    /// 切换并保存主题，返回新主题
    pub fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.load_theme().toggled();
        self.save_theme(theme)?;
        Ok(theme)
    }
}

pub fn default_preferences_path() -> Result<PathBuf> {
    directories::ProjectDirs::from("ua", "DataSearch", "datasearch")
        .map(|dirs| dirs.config_dir().join(PREFERENCES_FILE))
        .ok_or_else(|| AppError::Config("无法确定用户配置目录".into()))
}
