//! 输出行的构造
//!
//! 每个携带查询的日志行，按提取到的每个表引用各生成一行；
//! 构造失败时给出 [`SkipReason`] 而不是错误，由上层统计后继续。

use crate::audit::line::{LogLine, SessionFields};
use crate::audit::tables::extract_tables;
use std::fmt;

/// 没有 schema 前缀时使用的字面值
pub const NO_SCHEMA: &str = "None";

/// CSV 表头
pub const CSV_HEADER: &str = "timestamp;database;username;userid;schema;table";

/// 写出前从整行中删除的字符
const STRIPPED_CHARS: [char; 3] = ['\'', '"', '\\'];

/// 跳过某一行（或某个表）的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    /// 缺少 `[` 或 `]`，或顺序颠倒
    NoBracket,
    /// 元数据块的词数不足
    TooFewTokens,
    /// 必需的词中没有 `=`
    MissingSeparator,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoBracket => "no_bracket",
            SkipReason::TooFewTokens => "too_few_tokens",
            SkipReason::MissingSeparator => "missing_separator",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 可能带 schema 前缀的表引用
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableReference {
    pub schema: String,
    pub table: String,
}

impl TableReference {
    /// 在第一个 `.` 处拆分；没有 `.` 时 schema 为 `None`
    pub fn parse(token: &str) -> Self {
        match token.split_once('.') {
            Some((schema, table)) => {
                Self { schema: schema.to_string(), table: table.to_string() }
            }
            None => {
                Self { schema: NO_SCHEMA.to_string(), table: token.to_string() }
            }
        }
    }
}

/// 一条 CSV 输出行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub timestamp: String,
    pub database: String,
    pub username: String,
    pub user_id: String,
    pub schema: String,
    pub table: String,
}

impl OutputRow {
    pub fn new(
        timestamp: &str,
        session: &SessionFields,
        table: TableReference,
    ) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            database: session.database.clone(),
            username: session.username.clone(),
            user_id: session.user_id.clone(),
            schema: table.schema,
            table: table.table,
        }
    }

    /// 渲染为一行 CSV（不含换行）。
    ///
    /// 先给每个字段加双引号并用 `;` 拼接，再对整行删除所有 `'`、`"`、`\`。
    /// 字段内的 `;` 不做转义。
    pub fn to_csv_line(&self) -> String {
        let quoted = format!(
            "\"{}\";\"{}\";\"{}\";\"{}\";\"{}\";\"{}\"",
            self.timestamp,
            self.database,
            self.username,
            self.user_id,
            self.schema,
            self.table
        );
        quoted.replace(STRIPPED_CHARS, "")
    }
}

/// 单个 (行, 表) 组合的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Emitted(OutputRow),
    Skipped(SkipReason),
}

/// 为一行生成所有输出结果。
///
/// 非查询行返回空；查询行按提取到的每个表返回一个结果，元数据损坏时
/// 每个表都得到同一个跳过原因。
pub fn rows_for_line(line: &LogLine) -> Vec<RowOutcome> {
    if !line.is_query() {
        return Vec::new();
    }

    let tables = extract_tables(line.as_str());
    if tables.is_empty() {
        return Vec::new();
    }

    let session = line.session();
    tables
        .iter()
        .map(|token| match &session {
            Ok((timestamp, fields)) => RowOutcome::Emitted(OutputRow::new(
                timestamp,
                fields,
                TableReference::parse(token),
            )),
            Err(reason) => RowOutcome::Skipped(*reason),
        })
        .collect()
}
