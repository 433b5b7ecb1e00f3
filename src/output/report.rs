// src/output/report.rs
use std::fs;
use std::path::Path;
use anyhow::{anyhow, Context};
use chrono::{SecondsFormat, Utc};
use log::info;
use serde_json::Value;
use crate::models::{ExploitResult, ScanResult, Vulnerability};
use crate::output::file;

/// 报告输入：扫描结果或漏洞利用结果，由类型字段区分
#[derive(Debug, Clone, PartialEq)]
pub enum ReportData {
    Scan(ScanResult),
    Exploit(ExploitResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Html,
}

impl ReportData {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(json).context("input is not valid JSON")?;

        if has_tag(&value, "scan_type") {
            let scan = serde_json::from_value(value).context("malformed scan result")?;
            return Ok(ReportData::Scan(scan));
        }

        if has_tag(&value, "exploit_type") {
            let exploit = serde_json::from_value(value).context("malformed exploit result")?;
            return Ok(ReportData::Exploit(exploit));
        }

        Err(anyhow!("input is neither a scan result nor an exploit result"))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        Self::from_json(&content)
    }
}

fn has_tag(value: &Value, field: &str) -> bool {
    value
        .get(field)
        .and_then(Value::as_str)
        .map_or(false, |s| !s.is_empty())
}

pub fn generate(input: &Path, output: &Path, format: ReportFormat) -> anyhow::Result<()> {
    let data = ReportData::load(input)?;

    let content = match format {
        ReportFormat::Text => render_text(&data),
        ReportFormat::Html => render_html(&data),
    };

    file::write_to_file(output, &content)
        .with_context(|| format!("failed to write report {}", output.display()))?;
    info!("Report generated: {}", output.display());

    Ok(())
}

pub fn render_text(data: &ReportData) -> String {
    let mut content = String::new();

    content.push_str("===============================================\n");
    content.push_str("            FORTSCAN SECURITY REPORT           \n");
    content.push_str("===============================================\n\n");
    content.push_str(&format!("Generated On: {}\n\n", now_rfc3339()));

    match data {
        ReportData::Scan(scan) => {
            content.push_str("SCAN RESULTS\n------------\n\n");
            content.push_str(&format!("Target: {}\n", scan.target));
            content.push_str(&format!("Scan Type: {}\n", scan.scan_type));
            content.push_str(&format!("Start Time: {}\n", scan.start_time.to_rfc3339_opts(SecondsFormat::Secs, true)));
            content.push_str(&format!("End Time: {}\n", scan.end_time.to_rfc3339_opts(SecondsFormat::Secs, true)));
            content.push_str(&format!("Duration: {}\n\n", scan.duration));

            content.push_str("VULNERABILITY SUMMARY\n---------------------\n\n");
            content.push_str(&format!("Total Vulnerabilities: {}\n", scan.summary.total));
            content.push_str(&format!("Critical: {}\n", scan.summary.critical));
            content.push_str(&format!("High: {}\n", scan.summary.high));
            content.push_str(&format!("Medium: {}\n", scan.summary.medium));
            content.push_str(&format!("Low: {}\n", scan.summary.low));
            content.push_str(&format!("Info: {}\n\n", scan.summary.info));

            if !scan.vulnerabilities.is_empty() {
                content.push_str("VULNERABILITY DETAILS\n---------------------\n\n");
                for (i, vuln) in scan.vulnerabilities.iter().enumerate() {
                    content.push_str(&format!("Vulnerability #{}\n", i + 1));
                    content.push_str(&format!("  Severity: {}\n", vuln.severity));
                    push_common_text(&mut content, vuln);
                    if let Some(score) = vuln.cvss_score {
                        content.push_str(&format!("  CVSS Score: {:.1}\n", score));
                    }
                    if let Some(cve) = &vuln.cve_id {
                        content.push_str(&format!("  CVE ID: {}\n", cve));
                    }
                    if let Some(remediation) = &vuln.remediation {
                        content.push_str(&format!("  Remediation: {}\n", remediation));
                    }
                    if !vuln.references.is_empty() {
                        content.push_str("  References:\n");
                        for reference in &vuln.references {
                            content.push_str(&format!("    - {}\n", reference));
                        }
                    }
                    content.push('\n');
                }
            }
        }
        ReportData::Exploit(exploit) => {
            content.push_str("EXPLOITATION RESULTS\n--------------------\n\n");
            content.push_str(&format!("Target: {}\n", exploit.target));
            content.push_str(&format!("Exploit Type: {}\n", exploit.exploit_type));
            content.push_str(&format!("Safe Mode: {}\n", exploit.safe_mode));
            content.push_str(&format!("Duration: {}\n", exploit.duration));
            content.push_str(&format!("Success Count: {}\n", exploit.success_count));
            content.push_str(&format!("Fail Count: {}\n\n", exploit.fail_count));

            if !exploit.vulnerabilities.is_empty() {
                content.push_str("EXPLOITATION DETAILS\n--------------------\n\n");
                for (i, vuln) in exploit.vulnerabilities.iter().enumerate() {
                    content.push_str(&format!("Exploitation Attempt #{}\n", i + 1));
                    content.push_str(&format!("  Status: {}\n", exploit_status(vuln)));
                    push_common_text(&mut content, vuln);
                    if let Some(details) = &vuln.exploit_info {
                        content.push_str(&format!("  Details: {}\n", details));
                    }
                    if let Some(evidence) = &vuln.evidence {
                        content.push_str(&format!("  Evidence: {}\n", evidence));
                    }
                    if let Some(remediation) = &vuln.remediation {
                        content.push_str(&format!("  Remediation: {}\n", remediation));
                    }
                    content.push('\n');
                }
            }
        }
    }

    content.push_str("===============================================\n");
    content
}

fn push_common_text(content: &mut String, vuln: &Vulnerability) {
    content.push_str(&format!("  Name: {}\n", vuln.name));
    content.push_str(&format!("  Description: {}\n", vuln.description));
    content.push_str(&format!("  Location: {}\n", vuln.location));
}

fn exploit_status(vuln: &Vulnerability) -> &'static str {
    if vuln.exploited.unwrap_or(false) {
        "SUCCESS"
    } else {
        "FAILED"
    }
}

pub fn render_html(data: &ReportData) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>FortScan Security Report</title>\n<style>\n");
    html.push_str("body { font-family: Arial, sans-serif; margin: 20px; }\n");
    html.push_str("h1, h2 { color: #336699; }\n");
    html.push_str("table { border-collapse: collapse; width: 100%; margin-top: 20px; }\n");
    html.push_str("th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }\n");
    html.push_str("th { background-color: #f2f2f2; }\n");
    html.push_str(".critical { color: #d9534f; }\n.high { color: #f0ad4e; }\n");
    html.push_str(".medium { color: #5bc0de; }\n.low { color: #5cb85c; }\n.info { color: #777777; }\n");
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<h1>FortScan Security Report</h1>\n");
    html.push_str(&format!("<p>Generated: {}</p>\n", now_rfc3339()));

    match data {
        ReportData::Scan(scan) => {
            html.push_str("<h2>Scan Results</h2>\n");
            html.push_str(&field("Target", &scan.target));
            html.push_str(&field("Scan Type", scan.scan_type.as_str()));
            html.push_str(&field("Duration", &scan.duration));

            html.push_str("<h2>Vulnerability Summary</h2>\n");
            html.push_str(&field("Total Vulnerabilities", &scan.summary.total.to_string()));
            html.push_str(&field("Critical", &scan.summary.critical.to_string()));
            html.push_str(&field("High", &scan.summary.high.to_string()));
            html.push_str(&field("Medium", &scan.summary.medium.to_string()));
            html.push_str(&field("Low", &scan.summary.low.to_string()));
            html.push_str(&field("Info", &scan.summary.info.to_string()));

            if !scan.vulnerabilities.is_empty() {
                html.push_str("<h2>Vulnerability Details</h2>\n<table>\n");
                html.push_str("<tr><th>Severity</th><th>Name</th><th>Location</th><th>Description</th><th>Remediation</th></tr>\n");
                for vuln in &scan.vulnerabilities {
                    html.push_str(&format!(
                        "<tr><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                        vuln.severity.as_str().to_lowercase(),
                        vuln.severity,
                        escape_html(&vuln.name),
                        escape_html(&vuln.location),
                        escape_html(&vuln.description),
                        escape_html(vuln.remediation.as_deref().unwrap_or("")),
                    ));
                }
                html.push_str("</table>\n");
            }
        }
        ReportData::Exploit(exploit) => {
            html.push_str("<h2>Exploitation Results</h2>\n");
            html.push_str(&field("Target", &exploit.target));
            html.push_str(&field("Exploit Type", &exploit.exploit_type));
            html.push_str(&field("Safe Mode", &exploit.safe_mode.to_string()));
            html.push_str(&field("Duration", &exploit.duration));
            html.push_str(&field("Success Count", &exploit.success_count.to_string()));
            html.push_str(&field("Fail Count", &exploit.fail_count.to_string()));

            if !exploit.vulnerabilities.is_empty() {
                html.push_str("<h2>Exploitation Details</h2>\n<table>\n");
                html.push_str("<tr><th>Status</th><th>Name</th><th>Location</th><th>Details</th></tr>\n");
                for vuln in &exploit.vulnerabilities {
                    let status = exploit_status(vuln);
                    let class = if status == "SUCCESS" { "high" } else { "critical" };
                    html.push_str(&format!(
                        "<tr><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                        class,
                        status,
                        escape_html(&vuln.name),
                        escape_html(&vuln.location),
                        escape_html(vuln.exploit_info.as_deref().unwrap_or("")),
                    ));
                }
                html.push_str("</table>\n");
            }
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn field(label: &str, value: &str) -> String {
    format!("<p><strong>{}:</strong> {}</p>\n", label, escape_html(value))
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
