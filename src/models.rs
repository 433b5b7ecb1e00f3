// src/models.rs
use std::fmt;
use std::time::Instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 漏洞严重程度，按 Critical > High > Medium > Low > Info 排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单条发现。创建后不再修改，扫描器只在发布前补全目标、位置和时间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub id: String,
    pub name: String,
    pub description: String,
    pub severity: Severity,
    pub target: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub exploitable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvss_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exploit_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exploited: Option<bool>,
}

impl Vulnerability {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            severity,
            target: String::new(),
            location: String::new(),
            timestamp: Utc::now(),
            exploitable: false,
            cvss_score: None,
            cve_id: None,
            remediation: None,
            references: Vec::new(),
            evidence: None,
            exploit_info: None,
            exploited: None,
        }
    }

    pub fn exploitable(mut self, exploitable: bool) -> Self {
        self.exploitable = exploitable;
        self
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn with_cvss(mut self, score: f64) -> Self {
        // 0 表示没有评分
        self.cvss_score = if score > 0.0 { Some(score) } else { None };
        self
    }

    /// 填入目标和位置，时间戳取当前时刻
    pub fn stamped(mut self, target: impl Into<String>, location: impl Into<String>) -> Self {
        self.target = target.into();
        self.location = location.into();
        self.timestamp = Utc::now();
        self
    }
}

/// 按严重程度统计的摘要，只能从发现列表整体计算得到
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

impl ResultSummary {
    pub fn from_findings(findings: &[Vulnerability]) -> Self {
        let mut summary = ResultSummary {
            total: findings.len(),
            ..Default::default()
        };

        for finding in findings {
            match finding.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
        }

        summary
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Network,
    Web,
    Full,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Network => "network",
            ScanType::Web => "web",
            ScanType::Full => "full",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub target: String,
    pub scan_type: ScanType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: String,
    pub vulnerabilities: Vec<Vulnerability>,
    pub summary: ResultSummary,
}

impl ScanResult {
    /// 结束一次扫描：摘要总是从完整的发现列表重新计算
    pub fn finish(
        target: impl Into<String>,
        scan_type: ScanType,
        start_time: DateTime<Utc>,
        started: Instant,
        vulnerabilities: Vec<Vulnerability>,
    ) -> Self {
        let summary = ResultSummary::from_findings(&vulnerabilities);

        Self {
            target: target.into(),
            scan_type,
            start_time,
            end_time: Utc::now(),
            duration: format!("{:.2?}", started.elapsed()),
            vulnerabilities,
            summary,
        }
    }
}

/// 漏洞利用结果。本工具不执行利用，只定义报告层需要识别的结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploitResult {
    pub target: String,
    pub exploit_type: String,
    pub safe_mode: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: String,
    pub vulnerabilities: Vec<Vulnerability>,
    pub success_count: usize,
    pub fail_count: usize,
}
