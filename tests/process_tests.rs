//! 文件级转换的集成测试

mod common;

use audit_log_csv::process::process_file;
use audit_log_csv::audit::SkipReason;
use std::fs;
use tempfile::tempdir;

const HEADER: &str = "timestamp;database;username;userid;schema;table";

#[test]
fn test_sample_log_rows() {
    let dir = tempdir().unwrap();
    let input =
        common::create_gz_log(dir.path(), "useractivitylog_1.gz", common::SAMPLE_AUDIT_LOG);
    let output = dir.path().join("out.csv");

    let stats = process_file(&input, &output).unwrap();
    assert_eq!(stats.lines_read, 5);
    assert_eq!(stats.query_lines, 3);
    assert_eq!(stats.rows_written, 3);
    assert_eq!(stats.skipped[&SkipReason::TooFewTokens], 1);

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with(&format!("{HEADER}\n")));
    assert_eq!(
        common::data_rows(&csv),
        vec![
            "2024-03-01T10:15:42Z UTC;analytics;alice;42;None;sales",
            "2024-03-01T10:15:44Z UTC;dev;bob;7;public;orders",
            "2024-03-01T10:15:44Z UTC;dev;bob;7;crm;customers",
        ]
    );
}

#[test]
fn test_single_query_line_fields() {
    let dir = tempdir().unwrap();
    let input = common::create_gz_log(
        dir.path(),
        "one.gz",
        "LOG:  2023-01-01 00:00:00 [ db=analytics user=alice pid=123 userid=42 xid=99] LOG: SELECT x FROM sales\n",
    );
    let output = dir.path().join("one.csv");
    process_file(&input, &output).unwrap();

    let rows = common::data_rows(&fs::read_to_string(&output).unwrap());
    assert_eq!(rows.len(), 1);
    let fields: Vec<&str> = rows[0].split(';').collect();
    assert_eq!(fields.len(), 6);
    assert_eq!(&fields[1..], &["analytics", "alice", "42", "None", "sales"]);
}

#[test]
fn test_from_without_select_yields_nothing() {
    let dir = tempdir().unwrap();
    let input = common::create_gz_log(
        dir.path(),
        "nosel.gz",
        "'ts [ db=a user=b pid=1 userid=2 ]' LOG: DELETE FROM t\n",
    );
    let output = dir.path().join("nosel.csv");
    let stats = process_file(&input, &output).unwrap();

    assert_eq!(stats.rows_written, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), format!("{HEADER}\n"));
}

#[test]
fn test_malformed_metadata_does_not_abort() {
    let dir = tempdir().unwrap();
    let content = "\
'ts1 [ db=a user=b ]' LOG: select * from x join y
'ts2 [ db=a user=b pid=1 userid=2 ]' LOG: select * from z
";
    let input = common::create_gz_log(dir.path(), "mixed.gz", content);
    let output = dir.path().join("mixed.csv");
    let stats = process_file(&input, &output).unwrap();

    assert_eq!(stats.skipped_rows(), 2);
    assert_eq!(
        common::data_rows(&fs::read_to_string(&output).unwrap()),
        vec!["ts2;a;b;2;None;z"]
    );
}

#[test]
fn test_no_quotes_or_backslashes_in_output() {
    let dir = tempdir().unwrap();
    let content = "'ts [ db=\"qa\" user=o'neil pid=1 userid=\\9 ]' LOG: select * from \"S\".\"T\" join x\\y\n";
    let input = common::create_gz_log(dir.path(), "quotes.gz", content);
    let output = dir.path().join("quotes.csv");
    process_file(&input, &output).unwrap();

    let csv = fs::read_to_string(&output).unwrap();
    let rows = common::data_rows(&csv);
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert!(!row.contains(['\'', '"', '\\']), "row still quoted: {row}");
    }
    assert!(rows.contains(&"ts;qa;oneil;9;S;T".to_string()));
}

#[test]
fn test_reprocessing_is_byte_identical() {
    let dir = tempdir().unwrap();
    let input =
        common::create_gz_log(dir.path(), "same.gz", common::SAMPLE_AUDIT_LOG);
    let out_a = dir.path().join("a.csv");
    let out_b = dir.path().join("b.csv");

    process_file(&input, &out_a).unwrap();
    process_file(&input, &out_b).unwrap();
    assert_eq!(fs::read(&out_a).unwrap(), fs::read(&out_b).unwrap());
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = tempdir().unwrap();
    let input = common::create_gz_log(dir.path(), "ow.gz", "no queries here\n");
    let output = dir.path().join("ow.csv");
    fs::write(&output, "old content that is much longer than the header\n".repeat(10))
        .unwrap();

    process_file(&input, &output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), format!("{HEADER}\n"));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let err = process_file(dir.path().join("absent.gz"), dir.path().join("o.csv"))
        .unwrap_err();
    assert!(err.is_io_error());
}

#[test]
fn test_not_gzip_is_io_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("plain.gz");
    fs::write(&input, "select * from t\n").unwrap();
    let err = process_file(&input, dir.path().join("o.csv")).unwrap_err();
    assert!(err.is_io_error());
}
