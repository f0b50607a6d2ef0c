//! 表引用提取
//!
//! 不是 SQL 解析器：剥离注释后按分隔符切词，取紧跟在 `FROM`/`JOIN`
//! 之后的那个词作为表引用。`USING`、CTE 等其它语法引入的表会被漏掉。

use crate::audit::comments::strip_comments;
use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 空白、括号、分号的连续序列
    static ref TOKEN_SEPARATOR_RE: Regex = Regex::new(r"[\s)(;]+").unwrap();
}

/// 转义渲染后行内出现的字面 `\n`
const ESCAPED_NEWLINE: &str = "\\n";

/// 从 SQL 文本中提取去重后的原始表词。
///
/// 返回的词保持出现顺序，可能带 schema 前缀，尚未拆分。
///
/// ```
/// use audit_log_csv::audit::extract_tables;
///
/// let tables = extract_tables("SELECT * FROM schema1.tableA JOIN tableB ON 1=1");
/// assert!(tables.contains("schema1.tableA"));
/// assert!(tables.contains("tableB"));
/// assert_eq!(tables.len(), 2);
/// ```
#[must_use]
pub fn extract_tables(sql: &str) -> IndexSet<String> {
    let cleaned = strip_comments(sql);

    let mut tables = IndexSet::new();
    let mut expect_table = false;

    for token in tokenize(&cleaned) {
        let lower = token.to_lowercase();
        if expect_table {
            if lower != "select" {
                tables.insert(token.replace(ESCAPED_NEWLINE, ""));
            }
        }
        expect_table = matches!(lower.as_str(), "from" | "join");
    }

    tracing::trace!("提取到 {} 个表引用", tables.len());
    tables
}

/// 按空白、括号、分号切词，丢弃空词
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_SEPARATOR_RE.split(text).filter(|t| !t.is_empty())
}
