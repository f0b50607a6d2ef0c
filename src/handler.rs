//! 事件处理：下载 → 转换 → 上传
//!
//! 记录按顺序处理；任意一条记录遇到致命错误时，本批次剩余记录不再处理。

use crate::config::Config;
use crate::error::Result;
use crate::event::{ObjectEvent, ObjectRef};
use crate::exporter::ProcessStats;
use crate::process::process_file;
use crate::storage::ObjectStore;
use std::path::PathBuf;

/// 一批事件的处理结果
#[derive(Debug, Default, Clone)]
pub struct BatchSummary {
    /// 已处理的对象（目标位置）
    pub processed: Vec<ObjectRef>,
    /// 因键不匹配而跳过的对象
    pub skipped: Vec<ObjectRef>,
    /// 所有已处理文件合并后的统计
    pub stats: ProcessStats,
}

/// 事件处理器，持有启动时加载的配置和对象存储
pub struct Handler<S: ObjectStore> {
    config: Config,
    store: S,
}

impl<S: ObjectStore> Handler<S> {
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 处理一批事件
    pub fn handle(&self, event: &ObjectEvent) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for source in event.objects() {
            if !source.matches(&self.config.processing.key_marker) {
                tracing::info!("Skipping {}", source);
                summary.skipped.push(source);
                continue;
            }

            let (target, stats) = self.handle_object(&source)?;
            summary.stats.merge(&stats);
            summary.processed.push(target);
        }

        tracing::info!(
            processed = summary.processed.len(),
            skipped = summary.skipped.len(),
            "批次完成: {}",
            summary.stats
        );
        Ok(summary)
    }

    /// 处理单个对象，返回上传位置和统计
    pub fn handle_object(
        &self,
        source: &ObjectRef,
    ) -> Result<(ObjectRef, ProcessStats)> {
        let scratch = &self.config.processing.scratch_dir;
        std::fs::create_dir_all(scratch)?;
        let local_in: PathBuf = scratch.join(source.file_name());
        let local_out: PathBuf = scratch.join(source.csv_file_name());

        tracing::info!("Downloading {} to {}", source, local_in.display());
        self.store.fetch(source, &local_in)?;
        tracing::info!("Downloaded {} to {}", source, local_in.display());

        let stats = process_file(&local_in, &local_out)?;
        tracing::info!("Processed file {} into csv file", source.file_name());

        let target =
            ObjectRef::new(&self.config.output.bucket, &source.csv_key());
        self.store.store(&local_out, &target)?;
        tracing::info!(
            "Uploaded file {} to {} via {}",
            source.csv_file_name(),
            target,
            self.store.name()
        );

        Ok((target, stats))
    }
}
