//! SQL 注释剥离
//!
//! 两个阶段，各自是纯函数：
//! 1. [`strip_block_comments`] 删除所有 `/* ... */` 块注释（非贪婪，可跨行）
//! 2. [`strip_line_comments`] 删除整行 `--`/`#` 注释并截断行尾注释

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";

/// 删除所有块注释。
///
/// 每次从当前位置找最近的 `/*`，再找它之后最近的 `*/`，删除整个区间。
/// 没有闭合的 `/*` 原样保留。
#[must_use]
pub fn strip_block_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut rest = sql;

    while let Some(open) = rest.find(BLOCK_OPEN) {
        let body = &rest[open + BLOCK_OPEN.len()..];
        match body.find(BLOCK_CLOSE) {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &body[close + BLOCK_CLOSE.len()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// 删除行注释，并把剩余行用单个空格拼接。
///
/// - 首个非空白字符是 `--` 或 `#` 的行整行丢弃
/// - 其余行在第一个 `--` 或 `#` 处截断
#[must_use]
pub fn strip_line_comments(sql: &str) -> String {
    sql.split(['\n', '\r'])
        .filter(|line| !is_comment_line(line))
        .map(truncate_trailing_comment)
        .collect::<Vec<_>>()
        .join(" ")
}

/// 依次执行两个阶段
#[must_use]
pub fn strip_comments(sql: &str) -> String {
    strip_line_comments(&strip_block_comments(sql))
}

fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("--") || trimmed.starts_with('#')
}

fn truncate_trailing_comment(line: &str) -> &str {
    let dash = line.find("--");
    let hash = line.find('#');
    let cut = match (dash, hash) {
        (Some(d), Some(h)) => Some(d.min(h)),
        (d, h) => d.or(h),
    };
    cut.map_or(line, |idx| &line[..idx])
}
