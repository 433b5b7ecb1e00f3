// src/doc.rs
//! 命令行用法示例，显示在 `--help` 末尾

pub const USAGE: &str = r#"示例:
    # 扫描常用端口
    fortscan-rs network --target 192.168.1.10 --ports 21,22,80,443,3306

    # 扫描端口范围并保存JSON结果
    fortscan-rs network -t 192.168.1.10 -p 1-1024 --threads 200 -o results.json

    # 检查Web安全响应头
    fortscan-rs web --target example.com

    # 端口扫描加Web扫描
    fortscan-rs full -t 192.168.1.10 -p 1-1000 -o full.json

    # 从保存的结果生成HTML报告
    fortscan-rs report --input full.json --output report.html --format html
"#;
