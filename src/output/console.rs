use colored::*;
use crate::models::{ScanResult, Severity, Vulnerability};

fn colorize(severity: Severity) -> ColoredString {
    let label = severity.as_str();
    match severity {
        Severity::Critical => label.bright_red().bold(),
        Severity::High => label.yellow(),
        Severity::Medium => label.blue(),
        Severity::Low => label.green(),
        Severity::Info => label.cyan(),
    }
}

/// 在终端打印扫描结果，按严重程度分组
pub fn display(result: &ScanResult) {
    println!("\n{}", "=== Scan Results ===".bold());
    println!("Target: {}", result.target);
    println!("Scan Type: {}", result.scan_type);
    println!("Duration: {}", result.duration);

    println!("\n{}", "=== Vulnerability Summary ===".bold());
    println!("Total Vulnerabilities: {}", result.summary.total);
    for severity in Severity::ALL {
        println!("{}: {}", colorize(severity), result.summary.count(severity));
    }

    if result.vulnerabilities.is_empty() {
        return;
    }

    println!("\n{}", "=== Vulnerability Details ===".bold());
    for vuln in grouped_by_severity(&result.vulnerabilities) {
        println!(
            "[{:<8}] {:<40} {:<14} {}",
            colorize(vuln.severity),
            vuln.name,
            vuln.location,
            vuln.description
        );
    }
}

fn grouped_by_severity(vulns: &[Vulnerability]) -> Vec<&Vulnerability> {
    let mut sorted: Vec<&Vulnerability> = vulns.iter().collect();
    sorted.sort_by_key(|v| v.severity);
    sorted
}
