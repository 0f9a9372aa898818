//! 应用配置：JSON 文件，所有字段可缺省

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::data_core::AppError;
use crate::model::output_format::OutputFormat;
use crate::utils::fs::read_json_file;

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV_VAR: &str = "UI_VISION_CODER_CONFIG";
/// 默认配置文件名（工作目录下）
pub const DEFAULT_CONFIG_FILE: &str = "ui_vision_coder.json";

/// 配置的来源
#[derive(Debug)]
pub enum ConfigSource {
    /// 未找到配置文件
    Defaults,
    File(PathBuf),
    /// 文件存在但无法读取或解析，已回退为默认值
    Invalid { path: PathBuf, error: AppError },
}

impl ConfigSource {
    /// 在日志系统安装后记录加载结果
    pub fn log(&self) {
        match self {
            Self::Defaults => tracing::info!("未找到配置文件，使用默认配置"),
            Self::File(path) => tracing::info!("已加载配置文件: {}", path.display()),
            Self::Invalid { path, error } => {
                tracing::error!("配置文件 {} 无效，使用默认配置: {}", path.display(), error)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation_delay_ms: u64,
    pub copy_feedback_ms: u64,
    pub toast_duration_ms: u64,
    pub default_format: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation_delay_ms: 2000,
            copy_feedback_ms: 2000,
            toast_duration_ms: 4000,
            default_format: OutputFormat::default().id().to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 从指定文件读取
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let value = read_json_file(path)?;
        Ok(serde_json::from_value(value)?)
    }

    /// 按 环境变量 → 工作目录 的顺序查找；文件不存在或无效时使用默认值
    ///
    /// 调用时日志系统尚未安装，加载情况由返回的 `ConfigSource` 在之后记录。
    pub fn load() -> (Self, ConfigSource) {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_or_default(&path)
    }

    pub fn load_or_default(path: &Path) -> (Self, ConfigSource) {
        if !path.exists() {
            return (Self::default(), ConfigSource::Defaults);
        }
        match Self::load_from(path) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(error) => (
                Self::default(),
                ConfigSource::Invalid {
                    path: path.to_path_buf(),
                    error,
                },
            ),
        }
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// 初始输出格式；未知标识符回退到默认格式
    pub fn initial_format(&self) -> OutputFormat {
        OutputFormat::from_id(&self.default_format).unwrap_or_else(|| {
            let fallback = OutputFormat::default();
            tracing::warn!("未知的默认格式 {}，回退为 {}", self.default_format, fallback);
            fallback
        })
    }

    /// 日志级别；无法识别时为 INFO
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
