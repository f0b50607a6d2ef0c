//! 日志初始化和配置模块
//!
//! 这个模块提供了统一的日志初始化功能，使用 tracing 库。
//! 默认配置：info 级别，输出到控制台和日志目录，按天滚动。

use std::io;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// 日志配置结构体
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: Level,
    /// 日志文件目录
    pub log_dir: String,
    /// 是否输出到控制台
    pub enable_stdout: bool,
}

impl LogConfig {
    /// 创建新的日志配置，使用默认级别
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置日志级别
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// 设置日志目录
    pub fn log_dir<S: Into<String>>(mut self, dir: S) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// 设置是否输出到控制台
    pub fn enable_stdout(mut self, enable: bool) -> Self {
        self.enable_stdout = enable;
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_dir: "logs".to_string(),
            enable_stdout: true,
        }
    }
}

impl From<&crate::config::LogConfig> for LogConfig {
    fn from(cfg: &crate::config::LogConfig) -> Self {
        // 级别已经在 Config::validate 中校验过
        let level = cfg.level.parse().unwrap_or(Level::INFO);
        Self {
            level,
            log_dir: cfg.log_dir.clone(),
            enable_stdout: cfg.enable_stdout,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),
}

/// 日志初始化结果
pub type LogResult<T> = Result<T, LogError>;

/// 初始化日志系统
///
/// - 控制台输出（可关闭）
/// - `log_dir` 下按天滚动的日志文件
/// - `RUST_LOG` 优先于配置中的级别
///
/// 重复调用是安全的：已经初始化过时直接返回 `Ok(())`。
///
/// # Examples
///
/// ```no_run
/// use audit_log_csv::logging::{init_logging, LogConfig};
/// use tracing::Level;
///
/// let config = LogConfig::new().level(Level::DEBUG);
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> LogResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender =
        tracing_appender::rolling::daily(&config.log_dir, "audit-log-csv");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(SystemTime)
        .with_target(true)
        .with_ansi(false);

    let console_layer = config.enable_stdout.then(|| {
        fmt::layer().with_timer(SystemTime).with_target(true).with_ansi(true)
    });

    match Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        Ok(()) => {
            // guard 必须活到进程结束，否则文件层会丢日志
            std::mem::forget(guard);
            tracing::info!(
                "日志系统初始化完成 - 级别 {}，目录 {}",
                config.level,
                config.log_dir
            );
            Ok(())
        }
        // 已经初始化过了，这不是错误
        Err(_) => Ok(()),
    }
}
