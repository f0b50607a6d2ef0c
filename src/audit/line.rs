//! 审计日志单行的字段提取
//!
//! 原始行字节先被渲染为转义的字节字面量形式（`b'…'`），之后所有固定偏移
//! 都作用在这个渲染结果上。渲染结果只含 ASCII，字节偏移即字符偏移；
//! 行尾换行以字面 `\n` 出现，由表提取阶段去掉。
//!
//! 典型的一行（渲染前）：
//!
//! ```text
//! '2024-03-01T10:15:42Z UTC [ db=dev user=alice pid=1234 userid=100 xid=5678 ]' LOG: select * from sales
//! ```

use crate::audit::row::SkipReason;
use std::fmt::Write as _;

/// 时间戳在渲染结果中的起始偏移：跳过 `b`、外层引号和日志自带的引号
pub const TIMESTAMP_OFFSET: usize = 3;

/// 把一行原始字节渲染为转义的字节字面量文本。
///
/// 规则：
/// - 外层引号默认为 `'`；内容含 `'` 且不含 `"` 时改用 `"`
/// - `\\`、外层引号、`\t`、`\n`、`\r` 使用反斜杠转义
/// - 其它控制字符以及非 ASCII 字节写成 `\xNN`
#[must_use]
pub fn render_line(raw: &[u8]) -> String {
    let quote = if raw.contains(&b'\'') && !raw.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    let mut out = String::with_capacity(raw.len() + 4);
    out.push('b');
    out.push(quote as char);
    for &b in raw {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            _ if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push(quote as char);
    out
}

/// 一行已渲染的审计日志
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    text: String,
}

/// 会话字段：库名、用户名、用户 ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFields {
    pub database: String,
    pub username: String,
    pub user_id: String,
}

impl LogLine {
    /// 从原始字节构造
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self { text: render_line(raw) }
    }

    /// 渲染后的完整文本
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 是否携带查询：小写后同时包含 `select` 与 `from`
    pub fn is_query(&self) -> bool {
        let lower = self.text.to_ascii_lowercase();
        lower.contains("select") && lower.contains("from")
    }

    /// 时间戳：偏移 3 到第一个 `[` 之前一个字符（不含）。
    ///
    /// 没有 `[` 时返回 `None`；区间为空时返回空串。
    pub fn timestamp(&self) -> Option<&str> {
        let bracket = self.text.find('[')?;
        let end = bracket.saturating_sub(1);
        Some(self.text.get(TIMESTAMP_OFFSET..end).unwrap_or(""))
    }

    /// 第一个 `[` 与第一个 `]` 之间的元数据块
    pub fn metadata(&self) -> Result<SessionMetadata<'_>, SkipReason> {
        let open = self.text.find('[').ok_or(SkipReason::NoBracket)?;
        let close = self.text.find(']').ok_or(SkipReason::NoBracket)?;
        if close < open {
            return Err(SkipReason::NoBracket);
        }
        Ok(SessionMetadata::parse(&self.text[open + 1..close]))
    }

    /// 时间戳加会话字段，任一缺失即返回跳过原因
    pub fn session(&self) -> Result<(&str, SessionFields), SkipReason> {
        let timestamp = self.timestamp().ok_or(SkipReason::NoBracket)?;
        let fields = self.metadata()?.fields()?;
        Ok((timestamp, fields))
    }
}

/// 元数据块中以空白分隔的 `key=value` 词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMetadata<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> SessionMetadata<'a> {
    /// 库名所在位置
    pub const DATABASE_POS: usize = 0;
    /// 用户名所在位置
    pub const USERNAME_POS: usize = 1;
    /// 用户 ID 所在位置
    pub const USER_ID_POS: usize = 3;

    pub fn parse(block: &'a str) -> Self {
        Self { tokens: block.split_whitespace().collect() }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 第 `pos` 个词 `=` 之后（到下一个 `=` 之前）的值
    pub fn value_at(&self, pos: usize) -> Result<&'a str, SkipReason> {
        let token = self.tokens.get(pos).ok_or(SkipReason::TooFewTokens)?;
        token.split('=').nth(1).ok_or(SkipReason::MissingSeparator)
    }

    /// 按键查找值，例如 `pid`、`xid`
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.tokens.iter().find_map(|token| {
            let mut parts = token.split('=');
            (parts.next() == Some(key)).then(|| parts.next()).flatten()
        })
    }

    /// 按约定位置取出库名、用户名、用户 ID
    pub fn fields(&self) -> Result<SessionFields, SkipReason> {
        Ok(SessionFields {
            database: self.value_at(Self::DATABASE_POS)?.to_string(),
            username: self.value_at(Self::USERNAME_POS)?.to_string(),
            user_id: self.value_at(Self::USER_ID_POS)?.to_string(),
        })
    }
}
