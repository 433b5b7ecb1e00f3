use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};

/// 创建进度条，不显示时返回隐藏的进度条
pub fn create_progress_bar(total: u64, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// 拼接 host:port，IPv6 地址加方括号
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// 人类可读的时长，例如 "1 minute, 5 seconds"
pub fn format_duration(d: Duration) -> String {
    let total = (d.as_millis() + 500) / 1000;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!(
            "{}, {}, {}",
            format_unit(hours, "hour"),
            format_unit(minutes, "minute"),
            format_unit(seconds, "second")
        )
    } else if minutes > 0 {
        format!("{}, {}", format_unit(minutes, "minute"), format_unit(seconds, "second"))
    } else {
        format_unit(seconds, "second")
    }
}

fn format_unit(value: u128, unit: &str) -> String {
    if value == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", value, unit)
    }
}
