use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use lazy_static::lazy_static;
use log::debug;
use crate::common::utils;
use crate::error::Result;

pub const UNKNOWN_SERVICE: &str = "Unknown";

lazy_static! {
    // 常见端口 => 服务名称
    static ref COMMON_PORTS: HashMap<u16, &'static str> = {
        let mut map = HashMap::new();
        map.insert(21, "FTP");
        map.insert(22, "SSH");
        map.insert(23, "Telnet");
        map.insert(25, "SMTP");
        map.insert(53, "DNS");
        map.insert(80, "HTTP");
        map.insert(110, "POP3");
        map.insert(143, "IMAP");
        map.insert(443, "HTTPS");
        map.insert(465, "SMTPS");
        map.insert(993, "IMAPS");
        map.insert(995, "POP3S");
        map.insert(3306, "MySQL");
        map.insert(3389, "RDP");
        map.insert(5432, "PostgreSQL");
        map.insert(8080, "HTTP-Proxy");
        map
    };
}

/// 需要发送HTTP请求确认的端口
const HTTP_PROBE_PORTS: [u16; 4] = [80, 8080, 443, 8443];

pub fn lookup(port: u16) -> &'static str {
    COMMON_PORTS.get(&port).copied().unwrap_or(UNKNOWN_SERVICE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedService {
    /// 端口表中的名称，漏洞规则按它匹配
    pub name: String,
    /// HTTP探测拿到的 Server 头
    pub server: Option<String>,
}

impl DetectedService {
    pub fn is_identified(&self) -> bool {
        self.name != UNKNOWN_SERVICE
    }
}

impl fmt::Display for DetectedService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.server {
            Some(server) => write!(f, "{} ({})", self.name, server),
            None => f.write_str(&self.name),
        }
    }
}

pub struct ServiceDetector {
    client: reqwest::Client,
}

impl ServiceDetector {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .danger_accept_invalid_certs(true) // 忽略SSL证书错误
            .build()?;

        Ok(Self { client })
    }

    /// 查端口表，Web端口再发一次GET取 Server 头。请求失败不影响结果
    pub async fn detect(&self, host: &str, port: u16) -> DetectedService {
        let mut detected = DetectedService {
            name: lookup(port).to_string(),
            server: None,
        };

        if HTTP_PROBE_PORTS.contains(&port) {
            detected.server = self.probe_server_header(host, port).await;
        }

        detected
    }

    async fn probe_server_header(&self, host: &str, port: u16) -> Option<String> {
        let scheme = if port == 443 || port == 8443 { "https" } else { "http" };
        let url = format!("{}://{}", scheme, utils::join_host_port(host, port));

        match self.client.get(&url).send().await {
            Ok(resp) => resp
                .headers()
                .get(reqwest::header::SERVER)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            Err(e) => {
                debug!("HTTP probe to {} failed: {}", url, e);
                None
            }
        }
    }
}
