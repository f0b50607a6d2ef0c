//! 审计日志解析模块
//!
//! 提供注释剥离、表引用提取、单行字段提取和输出行构造

pub mod comments;
pub mod line;
pub mod row;
pub mod tables;

// 重新导出核心类型和函数
pub use comments::{strip_block_comments, strip_comments, strip_line_comments};
pub use line::{LogLine, SessionFields, SessionMetadata, render_line};
pub use row::{
    CSV_HEADER, NO_SCHEMA, OutputRow, RowOutcome, SkipReason, TableReference,
    rows_for_line,
};
pub use tables::extract_tables;
