//! 对象创建事件的解析
//!
//! 只关心每条记录里的桶名与对象键，其它字段忽略。

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// 压缩后缀长度（`.gz`）
const COMPRESSED_SUFFIX_LEN: usize = 3;

/// 一批事件记录
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntity {
    /// 百分号编码的对象键
    pub key: String,
}

impl ObjectEvent {
    /// 从 JSON 文本解析
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// 从 JSON 文件解析
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// 按顺序给出每条记录的对象引用（键已解码）
    pub fn objects(&self) -> Vec<ObjectRef> {
        self.records.iter().map(EventRecord::object_ref).collect()
    }
}

impl EventRecord {
    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef::new(&self.s3.bucket.name, &decode_key(&self.s3.object.key))
    }
}

/// 解码百分号编码的对象键，`+` 保持原样，非法 UTF-8 用替换字符代替
pub fn decode_key(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes()))
        .into_owned()
}

/// 容器中的一个对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub container: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(container: &str, key: &str) -> Self {
        Self { container: container.to_string(), key: key.to_string() }
    }

    /// 最后一个 `/` 之前的部分，没有 `/` 时为空
    pub fn prefix(&self) -> &str {
        self.key.rfind('/').map_or("", |idx| &self.key[..idx])
    }

    /// 最后一个 `/` 之后的文件名
    pub fn file_name(&self) -> &str {
        self.key
            .rfind('/')
            .map_or(self.key.as_str(), |idx| &self.key[idx + 1..])
    }

    /// 输出文件名：去掉文件名最后 3 个字符后追加 `.csv`
    pub fn csv_file_name(&self) -> String {
        let name = self.file_name();
        let mut cut = name.len().saturating_sub(COMPRESSED_SUFFIX_LEN);
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}.csv", &name[..cut])
    }

    /// 目标容器中的输出键：与源键同前缀
    pub fn csv_key(&self) -> String {
        match self.prefix() {
            "" => self.csv_file_name(),
            prefix => format!("{}/{}", prefix, self.csv_file_name()),
        }
    }

    /// 键中是否包含标记子串
    pub fn matches(&self, marker: &str) -> bool {
        self.key.contains(marker)
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.container, self.key)
    }
}
