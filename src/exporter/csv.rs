//! 分号分隔 CSV 导出器
//!
//! 所有行先缓存在内存中，`finalize` 时连同表头一次性写出并刷新。

use crate::audit::{CSV_HEADER, OutputRow};
use crate::error::Result;
use std::io::Write;

/// 缓存式 CSV 导出器
pub struct CsvExporter<W: Write> {
    writer: W,
    buffer: String,
    rows: usize,
}

impl<W: Write> CsvExporter<W> {
    /// 创建导出器，表头立即进入缓存
    pub fn new(writer: W) -> Self {
        let mut buffer = String::with_capacity(CSV_HEADER.len() + 1);
        buffer.push_str(CSV_HEADER);
        buffer.push('\n');
        Self { writer, buffer, rows: 0 }
    }

    /// 追加一行到缓存
    pub fn push_row(&mut self, row: &OutputRow) {
        self.buffer.push_str(&row.to_csv_line());
        self.buffer.push('\n');
        self.rows += 1;
    }

    /// 已缓存的数据行数
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// 一次性写出缓存并刷新，返回底层 writer
    pub fn finalize(mut self) -> Result<W> {
        self.writer.write_all(self.buffer.as_bytes())?;
        self.writer.flush()?;
        tracing::debug!("CSV导出完成: {} 条记录", self.rows);
        Ok(self.writer)
    }
}
