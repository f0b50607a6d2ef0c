//! 数据导出模块
//!
//! 提供 CSV 导出器与处理统计

pub mod csv;
pub mod stats;

pub use csv::CsvExporter;
pub use stats::ProcessStats;
