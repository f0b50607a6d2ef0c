use crate::audit::{LogLine, RowOutcome, rows_for_line};
use crate::error::Result;
use crate::exporter::{CsvExporter, ProcessStats};
use flate2::read::MultiGzDecoder;
use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// 解压并转换单个审计日志文件。
///
/// # 参数
/// * `input` - gzip 压缩的审计日志路径
/// * `output` - CSV 输出路径，已存在时会被覆盖
///
/// # Errors
/// 打开、解压、写出失败时返回 `AuditLogError::Io`。格式不对的行只会被跳过并计入统计。
pub fn process_file<P, Q>(input: P, output: Q) -> Result<ProcessStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();
    tracing::trace!("开始解析文件: {}", input.display());

    let reader = BufReader::new(MultiGzDecoder::new(File::open(input)?));
    let writer = BufWriter::new(
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(output)?,
    );

    let stats = process_reader(reader, writer)?;
    stats.log_summary(&input.display().to_string());
    Ok(stats)
}

/// 从已解压的流逐行转换，全部读完后一次性写出。
///
/// 每行保留行尾换行参与渲染；非 UTF-8 字节不会导致失败。
pub fn process_reader<R, W>(mut reader: R, writer: W) -> Result<ProcessStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = ProcessStats::new();
    let mut exporter = CsvExporter::new(writer);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines_read += 1;

        let line = LogLine::from_bytes(&buf);
        if !line.is_query() {
            continue;
        }
        stats.query_lines += 1;

        for outcome in rows_for_line(&line) {
            match outcome {
                RowOutcome::Emitted(row) => {
                    exporter.push_row(&row);
                }
                RowOutcome::Skipped(reason) => {
                    tracing::trace!(
                        "行{} 跳过: {}",
                        stats.lines_read,
                        reason
                    );
                    stats.record_skip(reason);
                }
            }
        }
    }

    stats.rows_written = exporter.rows();
    exporter.finalize()?;
    stats.finish();
    Ok(stats)
}
