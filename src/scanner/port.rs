use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time::timeout;
use crate::common::utils;
use crate::error::Result;
use crate::models::{Severity, Vulnerability};
use crate::scanner::rules;
use crate::scanner::service::ServiceDetector;

/// 判断端口是否开放。拒绝、超时、不可达都算关闭
#[async_trait]
pub trait PortProbe: Send + Sync {
    async fn is_open(&self, host: &str, port: u16, timeout_duration: Duration) -> bool;
}

/// TCP全连接探测，连上后立即关闭，不收发数据
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnectProbe;

#[async_trait]
impl PortProbe for TcpConnectProbe {
    async fn is_open(&self, host: &str, port: u16, timeout_duration: Duration) -> bool {
        match timeout(timeout_duration, TcpStream::connect((host, port))).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(e)) => {
                debug!("{}:{} closed ({})", host, port, e);
                false
            }
            Err(_) => {
                debug!("{}:{} closed (timeout)", host, port);
                false
            }
        }
    }
}

pub struct PortScanner {
    probe: Arc<dyn PortProbe>,
    detector: Arc<ServiceDetector>,
    timeout: Duration,
    max_parallelism: usize,
    show_progress: bool,
}

impl PortScanner {
    pub fn new(timeout: Duration, max_parallelism: usize) -> Result<Self> {
        Self::with_probe(Arc::new(TcpConnectProbe), timeout, max_parallelism)
    }

    pub fn with_probe(
        probe: Arc<dyn PortProbe>,
        timeout: Duration,
        max_parallelism: usize,
    ) -> Result<Self> {
        Ok(Self {
            probe,
            detector: Arc::new(ServiceDetector::new(timeout)?),
            timeout,
            max_parallelism: max_parallelism.max(1),
            show_progress: false,
        })
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism
    }

    /// 并发探测所有端口，返回全部发现
    ///
    /// 同时在跑的探测不超过 `max_parallelism` 个，多出的端口等空位再开始。
    /// 所有任务结束且通道清空后才返回；发现的顺序取决于探测完成的先后。
    /// 任何一个端口任务异常退出时返回 `ScanError::Worker`。
    pub async fn scan(&self, target: &str, ports: &[u16]) -> Result<Vec<Vulnerability>> {
        if ports.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            "Starting port scan on {} with {} ports ({} parallel)...",
            target,
            ports.len(),
            self.max_parallelism
        );

        let pb = utils::create_progress_bar(ports.len() as u64, "Scanning ports", self.show_progress);
        let semaphore = Arc::new(Semaphore::new(self.max_parallelism));
        let (tx, mut rx) = mpsc::channel::<Vulnerability>(self.max_parallelism);
        let target: Arc<str> = Arc::from(target);

        // 单独的收集任务，避免发送端阻塞在满通道上而分发循环在等许可
        let collector = tokio::spawn(async move {
            let mut findings = Vec::new();
            while let Some(finding) = rx.recv().await {
                findings.push(finding);
            }
            findings
        });

        let mut workers = JoinSet::new();

        for &port in ports {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let tx = tx.clone();
            let probe = Arc::clone(&self.probe);
            let detector = Arc::clone(&self.detector);
            let target = Arc::clone(&target);
            let timeout_duration = self.timeout;
            let pb = pb.clone();

            workers.spawn(async move {
                let _permit = permit;

                if probe.is_open(&target, port, timeout_duration).await {
                    for finding in inspect_open_port(&detector, &target, port).await {
                        if tx.send(finding).await.is_err() {
                            break;
                        }
                    }
                }
                pb.inc(1);
            });
        }

        // 丢弃原始发送者，所有任务结束后收集任务才会退出
        drop(tx);

        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                warn!("Port task on {} failed: {}", target, e);
                failure.get_or_insert(e);
            }
        }

        let findings = collector.await?;
        if let Some(e) = failure {
            pb.abandon();
            return Err(e.into());
        }

        let open = findings.iter().filter(|f| f.id.starts_with(OPEN_PORT_PREFIX)).count();
        pb.finish_with_message(format!("Found {} open ports", open));
        info!("Port scan on {} finished: {} open ports, {} findings", target, open, findings.len());

        Ok(findings)
    }
}

const OPEN_PORT_PREFIX: &str = "OPEN-PORT-";

/// 开放端口：先发布服务规则的发现，最后发布端口本身
async fn inspect_open_port(
    detector: &ServiceDetector,
    target: &str,
    port: u16,
) -> Vec<Vulnerability> {
    let location = format!("tcp/{}", port);
    let service = detector.detect(target, port).await;
    debug!("Found open port {}:{} ({})", target, port, service);

    let description = if service.is_identified() {
        format!("Port {} is open on target {} with service: {}", port, target, service)
    } else {
        format!("Port {} is open on target {}", port, target)
    };

    let mut findings: Vec<Vulnerability> = if service.is_identified() {
        rules::classify(&service.name, port)
            .into_iter()
            .map(|v| v.stamped(target, location.as_str()))
            .collect()
    } else {
        Vec::new()
    };

    findings.push(
        Vulnerability::new(
            format!("{}{}", OPEN_PORT_PREFIX, port),
            format!("Open Port {}", port),
            description,
            Severity::Info,
        )
        .stamped(target, location),
    );

    findings
}
