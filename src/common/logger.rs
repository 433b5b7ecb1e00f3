use std::fs::File;
use std::io::Write;
use std::path::Path;
use chrono::Local;
use env_logger::{Builder, Target};
use log::{info, LevelFilter};

/// 初始化日志：verbose 输出调试信息，silent 只输出错误
pub fn init(verbose: bool, silent: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else if silent {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder.filter_level(level);
    // 依赖库的连接日志太多
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Warn);

    if let Some(log_path) = log_file {
        let file = File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder.format(|buf, record| {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(buf, "[{}] [{}] {}", timestamp, record.level(), record.args())
    });

    builder.try_init()?;

    if let Some(log_path) = log_file {
        info!("Logging to file: {}", log_path.display());
    }

    Ok(())
}
