//! 审计日志 → CSV 转换
//!
//! - [`audit`]：注释剥离、表引用提取、单行字段提取
//! - [`process`]：解压并逐行转换整个文件
//! - [`handler`]：按对象创建事件下载、转换、上传

pub mod audit;
pub mod config;
pub mod error;
pub mod event;
pub mod exporter;
pub mod handler;
pub mod process;
pub mod storage;

// 日志初始化 - 需要 logging 特性
#[cfg(feature = "logging")]
pub mod logging;

pub use audit::extract_tables;
pub use error::{AuditLogError, Result};
pub use process::{process_file, process_reader};
