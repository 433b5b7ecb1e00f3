use std::sync::Arc;
use std::time::{Duration, Instant};
use chrono::Utc;
use log::{debug, info, warn};
use crate::common::ports;
use crate::error::Result;
use crate::models::{ScanResult, ScanType};
use crate::scanner::{PortProbe, PortScanner, TcpConnectProbe};
use crate::webscan::{normalize_url, WebProbe};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 单次连接和HTTP请求的超时
    pub timeout: Duration,
    /// 同时进行的端口探测上限
    pub max_parallelism: usize,
    /// 递归爬取，目前的Web规则不使用
    pub recursive: bool,
    pub show_progress: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            max_parallelism: 100,
            recursive: false,
            show_progress: false,
        }
    }
}

pub struct ScanCoordinator {
    options: ScanOptions,
    probe: Arc<dyn PortProbe>,
}

impl ScanCoordinator {
    pub fn new(options: ScanOptions) -> Self {
        Self::with_probe(options, Arc::new(TcpConnectProbe))
    }

    pub fn with_probe(options: ScanOptions, probe: Arc<dyn PortProbe>) -> Self {
        Self { options, probe }
    }

    /// 端口扫描。端口参数错误时不做任何探测直接返回
    pub async fn network_scan(&self, target: &str, port_spec: &str) -> Result<ScanResult> {
        let start_time = Utc::now();
        let started = Instant::now();

        let ports = ports::parse_ports(port_spec)?;

        let scanner = PortScanner::with_probe(
            Arc::clone(&self.probe),
            self.options.timeout,
            self.options.max_parallelism,
        )?
        .show_progress(self.options.show_progress);

        let findings = scanner.scan(target, &ports).await?;

        Ok(ScanResult::finish(target, ScanType::Network, start_time, started, findings))
    }

    /// Web扫描。URL无效时返回错误，连接失败则记为一条发现
    pub async fn web_scan(&self, target: &str) -> Result<ScanResult> {
        let start_time = Utc::now();
        let started = Instant::now();

        let url = normalize_url(target)?;
        debug!(
            "Web scan on {} (recursive: {}, parallelism: {})",
            url, self.options.recursive, self.options.max_parallelism
        );

        let probe = WebProbe::new(self.options.timeout)?;
        let findings = probe.probe(&url).await;

        Ok(ScanResult::finish(url, ScanType::Web, start_time, started, findings))
    }

    /// 先端口扫描再Web扫描。Web阶段失败不影响整体结果
    pub async fn full_scan(&self, target: &str, port_spec: &str) -> Result<ScanResult> {
        let start_time = Utc::now();
        let started = Instant::now();
        info!("Starting full scan on {}", target);

        let network = self.network_scan(target, port_spec).await?;

        let web_findings = match self.web_scan(target).await {
            Ok(web) => web.vulnerabilities,
            Err(e) => {
                warn!("Web scan warning: {}", e);
                Vec::new()
            }
        };

        let mut findings = network.vulnerabilities;
        findings.extend(web_findings);

        Ok(ScanResult::finish(target, ScanType::Full, start_time, started, findings))
    }
}
