//! 对象存储接口
//!
//! 处理流程只依赖 [`ObjectStore`]：把对象取到本地路径、把本地文件存为对象。
//! [`LocalObjectStore`] 以目录模拟容器，供命令行和测试使用。

use crate::error::{AuditLogError, Result};
use crate::event::ObjectRef;
use std::fs;
use std::path::{Path, PathBuf};

/// 对象存储
pub trait ObjectStore {
    /// 存储名称，用于日志
    fn name(&self) -> &str;

    /// 把对象下载到本地路径
    fn fetch(&self, object: &ObjectRef, dest: &Path) -> Result<()>;

    /// 把本地文件上传为对象
    fn store(&self, src: &Path, object: &ObjectRef) -> Result<()>;
}

/// 本地目录存储：`root/<container>/<key>`
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// 对象对应的本地路径
    pub fn object_path(&self, object: &ObjectRef) -> PathBuf {
        self.root.join(&object.container).join(&object.key)
    }
}

impl ObjectStore for LocalObjectStore {
    fn name(&self) -> &str {
        "local"
    }

    fn fetch(&self, object: &ObjectRef, dest: &Path) -> Result<()> {
        let src = self.object_path(object);
        fs::copy(&src, dest).map_err(|e| {
            AuditLogError::storage(&object.container, &object.key, e)
        })?;
        Ok(())
    }

    fn store(&self, src: &Path, object: &ObjectRef) -> Result<()> {
        let dest = self.object_path(object);
        let to_storage_err =
            |e| AuditLogError::storage(&object.container, &object.key, e);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(to_storage_err)?;
        }
        fs::copy(src, &dest).map_err(to_storage_err)?;
        Ok(())
    }
}
