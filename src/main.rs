use anyhow::{Context, Result};
use audit_log_csv::{
    config::Config,
    event::ObjectEvent,
    handler::Handler,
    logging::{LogConfig, init_logging},
    process::process_file,
    storage::LocalObjectStore,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "audit-log-csv", version, about = "审计日志转 CSV")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 转换单个 gzip 审计日志
    Convert {
        /// 输入的 .gz 文件
        input: PathBuf,
        /// 输出的 CSV 文件
        output: PathBuf,
    },
    /// 处理一批对象创建事件
    Handle {
        /// 事件 JSON 文件
        #[arg(long)]
        event: PathBuf,
        /// 配置文件；缺省时从环境变量读取
        #[arg(long, env = "AUDIT_CONFIG")]
        config: Option<PathBuf>,
        /// 本地对象存储根目录
        #[arg(long, env = "AUDIT_STORE_ROOT")]
        store_root: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert { input, output } => {
            init_logging(LogConfig::default())?;
            let stats = process_file(&input, &output).with_context(|| {
                format!("转换失败: {}", input.display())
            })?;
            println!("{}", stats);
        }
        Command::Handle { event, config, store_root } => {
            let config = match config {
                Some(path) => {
                    Config::from_file_with_env(&path).with_context(|| {
                        format!("读取配置失败: {}", path.display())
                    })?
                }
                None => Config::from_env()?,
            };
            init_logging(LogConfig::from(&config.log))?;

            let batch = ObjectEvent::from_file(&event).with_context(|| {
                format!("读取事件失败: {}", event.display())
            })?;
            let store = LocalObjectStore::new(store_root);
            let handler = Handler::new(config, store);
            let summary = handler.handle(&batch)?;
            println!(
                "处理 {} 个对象，跳过 {} 个。{}",
                summary.processed.len(),
                summary.skipped.len(),
                summary.stats
            );
        }
    }

    Ok(())
}
