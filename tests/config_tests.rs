//! 配置模块的集成测试

use audit_log_csv::config::{Config, DEFAULT_KEY_MARKER};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[log]
enable_stdout = false
log_dir = "var/logs"
level = "debug"

[output]
bucket = "glue-import"

[processing]
key_marker = "useractivitylog"
scratch_dir = "/tmp/audit"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert!(!config.log.enable_stdout);
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.output.bucket, "glue-import");
    assert_eq!(config.processing.scratch_dir.to_str(), Some("/tmp/audit"));
}

#[test]
fn test_missing_bucket_is_config_error() {
    assert!(Config::from_str("[output]\nbucket = \"\"\n").unwrap_err().is_config_error());
    assert!(Config::from_str("[log]\nlevel = \"info\"\n").unwrap_err().is_config_error());
}

#[test]
fn test_invalid_level_rejected() {
    let err = Config::from_str("[log]\nlevel = \"loud\"\n[output]\nbucket = \"b\"\n")
        .unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let config = Config::new("round-trip");
    config.save_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.output.bucket, "round-trip");
    assert_eq!(loaded.processing.key_marker, DEFAULT_KEY_MARKER);
}

#[test]
fn test_from_env() {
    // 单个测试内顺序设置，避免与其它测试竞争同一变量
    unsafe {
        std::env::remove_var("OUTBUCKET");
    }
    assert!(Config::from_env().unwrap_err().is_config_error());

    unsafe {
        std::env::set_var("OUTBUCKET", "env-bucket");
        std::env::set_var("AUDIT_LOG_LEVEL", "WARN");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.output.bucket, "env-bucket");
    assert_eq!(config.log.level, "warn");

    // 文件里桶名留空或缺少 [output] 时由环境变量补上
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty_bucket.toml");
    fs::write(&empty, "[output]\nbucket = \"\"\n").unwrap();
    assert!(Config::from_file(&empty).unwrap_err().is_config_error());
    let config = Config::from_file_with_env(&empty).unwrap();
    assert_eq!(config.output.bucket, "env-bucket");
    assert_eq!(config.log.level, "warn");

    let no_output = dir.path().join("no_output.toml");
    fs::write(&no_output, "[log]\nlevel = \"debug\"\n").unwrap();
    let config = Config::from_file_with_env(&no_output).unwrap();
    assert_eq!(config.output.bucket, "env-bucket");

    unsafe {
        std::env::remove_var("OUTBUCKET");
        std::env::remove_var("AUDIT_LOG_LEVEL");
    }
    assert!(Config::from_file_with_env(&empty).unwrap_err().is_config_error());
}
