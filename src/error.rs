//! 错误类型定义
//!
//! 这个模块定义了库中使用的所有致命错误类型，使用 thiserror 提供丰富的错误信息。
//! 单行、单表级别的可跳过问题不走这里，见 [`crate::audit::SkipReason`]。

/// 审计日志转换的结果类型
pub type Result<T> = std::result::Result<T, AuditLogError>;

/// 审计日志转换错误类型
#[derive(Debug, thiserror::Error)]
pub enum AuditLogError {
    /// IO错误（打开、解压、写出）
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 事件 JSON 解析错误
    #[error("事件解析错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置文件解析错误
    #[error("配置文件解析错误: {0}")]
    Toml(#[from] toml::de::Error),

    /// 配置序列化错误
    #[error("配置序列化错误: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 对象存储读写错误
    #[error("对象存储错误 ({container}/{key}): {source}")]
    Storage {
        container: String,
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl AuditLogError {
    /// 创建一个配置错误
    pub fn config<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        tracing::error!("配置错误: {}", message);
        Self::Config(message)
    }

    /// 创建一个对象存储错误
    pub fn storage<C, K>(container: C, key: K, source: std::io::Error) -> Self
    where
        C: Into<String>,
        K: Into<String>,
    {
        let container = container.into();
        let key = key.into();
        tracing::error!("对象存储错误 {}/{}: {}", container, key, source);
        Self::Storage { container, key, source }
    }

    /// 检查是否为 IO 错误
    pub fn is_io_error(&self) -> bool {
        matches!(self, AuditLogError::Io(_))
    }

    /// 检查是否为配置错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, AuditLogError::Config(_) | AuditLogError::Toml(_))
    }

    /// 检查是否为对象存储错误
    pub fn is_storage_error(&self) -> bool {
        matches!(self, AuditLogError::Storage { .. })
    }
}
