//! 集成测试公共模块

use flate2::{Compression, write::GzEncoder};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 创建 gzip 压缩的审计日志文件
pub fn create_gz_log(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    let file = fs::File::create(&file_path).expect("Failed to create file");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(content.as_bytes())
        .expect("Failed to write gz content");
    encoder.finish().expect("Failed to finish gz stream");
    file_path
}

/// 在临时目录下创建日志
#[allow(dead_code)]
pub fn create_gz_log_in(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    create_gz_log(dir.path(), filename, content)
}

/// 读取 CSV 的数据行（去掉表头）
#[allow(dead_code)]
pub fn data_rows(csv: &str) -> Vec<String> {
    csv.lines().skip(1).map(str::to_string).collect()
}

/// 标准测试审计日志内容
#[allow(dead_code)]
pub const SAMPLE_AUDIT_LOG: &str = "\
'2024-03-01T10:15:42Z UTC [ db=analytics user=alice pid=123 userid=42 xid=99 ]' LOG: SELECT x FROM sales
'2024-03-01T10:15:43Z UTC [ db=analytics user=alice pid=123 userid=42 xid=100 ]' LOG: commit;
'2024-03-01T10:15:44Z UTC [ db=dev user=bob pid=124 userid=7 xid=101 ]' LOG: /* dashboard */ select a.id from public.orders a join crm.customers c on a.cid = c.id
'2024-03-01T10:15:45Z UTC [ db=dev user=bob ]' LOG: select * from broken_meta
'2024-03-01T10:15:46Z UTC [ db=dev user=bob pid=124 userid=7 xid=102 ]' LOG: delete FROM stale_rows
";
