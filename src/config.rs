//! 配置管理模块
//!
//! 配置在进程启动时加载一次，之后以不可变引用传给 [`crate::handler::Handler`]。

use crate::error::{AuditLogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 目标桶名的环境变量
pub const ENV_OUTBUCKET: &str = "OUTBUCKET";
/// 日志级别的环境变量
pub const ENV_LOG_LEVEL: &str = "AUDIT_LOG_LEVEL";
/// 临时目录的环境变量
pub const ENV_SCRATCH_DIR: &str = "AUDIT_SCRATCH_DIR";

/// 默认的对象键标记，只有包含它的对象才会被处理
pub const DEFAULT_KEY_MARKER: &str = "useractivitylog";

/// 主配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
    /// 输出配置，桶名可以由 `OUTBUCKET` 补上
    #[serde(default)]
    pub output: OutputConfig,
    /// 处理配置
    #[serde(default)]
    pub processing: ProcessingConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 是否启用控制台输出
    pub enable_stdout: bool,
    /// 日志输出目录
    pub log_dir: String,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 输出配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV 写入的目标桶
    pub bucket: String,
}

/// 处理配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// 对象键必须包含的子串
    pub key_marker: String,
    /// 下载与转换使用的本地临时目录
    pub scratch_dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enable_stdout: true,
            log_dir: "logs".to_string(),
            level: "info".to_string(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            key_marker: DEFAULT_KEY_MARKER.to_string(),
            scratch_dir: std::env::temp_dir(),
        }
    }
}

impl Config {
    /// 以目标桶创建配置，其余字段取默认值
    pub fn new<S: Into<String>>(bucket: S) -> Self {
        Self {
            log: LogConfig::default(),
            output: OutputConfig { bucket: bucket.into() },
            processing: ProcessingConfig::default(),
        }
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// 从字符串加载配置
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置，先用环境变量覆盖再校验
    ///
    /// 文件里留空的桶名可以由 `OUTBUCKET` 补上。
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 从环境变量加载配置
    ///
    /// `OUTBUCKET` 必须存在；`AUDIT_LOG_LEVEL`、`AUDIT_SCRATCH_DIR` 可选。
    pub fn from_env() -> Result<Self> {
        let bucket = std::env::var(ENV_OUTBUCKET).map_err(|_| {
            AuditLogError::config(format!("缺少环境变量 {ENV_OUTBUCKET}"))
        })?;
        let mut config = Self::new(bucket);
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 用环境变量覆盖已加载的配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(bucket) = std::env::var(ENV_OUTBUCKET) {
            self.output.bucket = bucket;
        }
        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            self.log.level = level.to_lowercase();
        }
        if let Ok(dir) = std::env::var(ENV_SCRATCH_DIR) {
            self.processing.scratch_dir = PathBuf::from(dir);
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        match self.log.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(AuditLogError::config(format!(
                    "无效的日志级别: {}",
                    self.log.level
                )));
            }
        }

        if self.output.bucket.trim().is_empty() {
            return Err(AuditLogError::config("目标桶名不能为空"));
        }

        if self.processing.key_marker.is_empty() {
            tracing::warn!("key_marker 为空，所有对象都会被处理");
        }

        Ok(())
    }
}
