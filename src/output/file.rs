// src/output/file.rs
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use anyhow::Context;
use serde::Serialize;

pub fn write_to_file(
    path: &Path,
    content: &str,
) -> io::Result<()> {
    // 确保目录存在
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

/// 以格式化JSON保存扫描结果
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize results")?;
    write_to_file(path, &json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
