//! 处理统计信息模块

use crate::audit::SkipReason;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// 单个文件（或一批文件合并后）的处理统计
#[derive(Debug, Default, Clone)]
pub struct ProcessStats {
    /// 读取的行数
    pub lines_read: usize,
    /// 携带查询的行数
    pub query_lines: usize,
    /// 写出的数据行数
    pub rows_written: usize,
    /// 按原因统计的跳过次数（每个表计一次）
    pub skipped: BTreeMap<SkipReason, usize>,
    /// 开始时间
    pub start_time: Option<Instant>,
    /// 完成时间
    pub end_time: Option<Instant>,
}

impl ProcessStats {
    /// 创建新的统计信息，记录开始时间
    pub fn new() -> Self {
        Self { start_time: Some(Instant::now()), ..Default::default() }
    }

    /// 标记完成，记录结束时间
    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// 记录一次跳过
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }

    /// 跳过总数
    pub fn skipped_rows(&self) -> usize {
        self.skipped.values().sum()
    }

    /// 计算持续时间
    pub fn duration(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    /// 计算每秒处理行数
    pub fn lines_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            if d.as_secs_f64() > 0.0 {
                self.lines_read as f64 / d.as_secs_f64()
            } else {
                0.0
            }
        })
    }

    /// 合并其他统计信息
    pub fn merge(&mut self, other: &ProcessStats) {
        self.lines_read += other.lines_read;
        self.query_lines += other.query_lines;
        self.rows_written += other.rows_written;
        for (reason, count) in &other.skipped {
            *self.skipped.entry(*reason).or_insert(0) += count;
        }

        // 保持最早的开始时间
        self.start_time = match (self.start_time, other.start_time) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        // 保持最晚的结束时间
        self.end_time = match (self.end_time, other.end_time) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// 以结构化字段输出汇总日志
    pub fn log_summary(&self, source: &str) {
        tracing::info!(
            source,
            lines = self.lines_read,
            query_lines = self.query_lines,
            rows = self.rows_written,
            skipped = self.skipped_rows(),
            "处理完成: {}",
            self
        );
        for (reason, count) in &self.skipped {
            tracing::debug!(source, %reason, count, "跳过的表引用");
        }
    }
}

impl std::fmt::Display for ProcessStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "行数: {}, 查询行: {}, 输出: {}, 跳过: {}",
            self.lines_read,
            self.query_lines,
            self.rows_written,
            self.skipped_rows()
        )?;

        if let Some(duration) = self.duration() {
            write!(f, ", 耗时: {:.2}s", duration.as_secs_f64())?;

            if let Some(lps) = self.lines_per_second() {
                write!(f, ", 速度: {:.2} 行/秒", lps)?;
            }
        }

        Ok(())
    }
}
