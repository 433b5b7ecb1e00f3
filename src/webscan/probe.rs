use std::time::Duration;
use log::{debug, info};
use reqwest::redirect::Policy;
use crate::error::{Result, ScanError};
use crate::models::{Severity, Vulnerability};
use crate::webscan::{headers, rules};

pub const MAX_REDIRECTS: usize = 10;

/// 补全 http:// 前缀并校验URL
pub fn normalize_url(target: &str) -> Result<String> {
    let target = target.trim();
    let lower = target.to_ascii_lowercase();

    let url = if lower.starts_with("http://") || lower.starts_with("https://") {
        target.to_string()
    } else {
        format!("http://{}", target)
    };

    match reqwest::Url::parse(&url) {
        Ok(parsed) if parsed.host_str().map_or(false, |h| !h.is_empty()) => Ok(url),
        _ => Err(ScanError::InvalidTarget(url)),
    }
}

pub struct WebProbe {
    client: reqwest::Client,
}

impl WebProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        // previous() 含最初的请求地址，与 Policy::limited 的计数一致
        let policy = Policy::custom(|attempt| {
            if attempt.previous().len() > MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else {
                attempt.follow()
            }
        });

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(policy)
            .build()?;

        Ok(Self { client })
    }

    /// 对目标发一次GET，连不上时只返回一条连接错误
    pub async fn probe(&self, url: &str) -> Vec<Vulnerability> {
        info!("Probing web server at {}", url);

        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!("Web request to {} failed: {:?}", url, e);
                return vec![connection_error(url, &e)];
            }
        };

        debug!("{} responded with {}", url, resp.status());

        let mut vulns = headers::check_headers(resp.headers(), url);
        vulns.extend(rules::common_web_vulnerabilities(url));
        vulns
    }
}

fn connection_error(url: &str, err: &reqwest::Error) -> Vulnerability {
    Vulnerability::new(
        "WEB-CONNECTION-ERROR",
        "Web Server Connection Error",
        format!("Failed to connect to web server: {}", error_chain(err)),
        Severity::Medium,
    )
    .stamped(url, "/")
}

// reqwest 的顶层错误信息不含底层原因
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_http_scheme_when_missing() {
        assert_eq!(normalize_url("example.com").unwrap(), "http://example.com");
        assert_eq!(normalize_url("10.0.0.5:8080/app").unwrap(), "http://10.0.0.5:8080/app");
        assert_eq!(normalize_url("localhost:3000").unwrap(), "http://localhost:3000");
    }

    #[test]
    fn keeps_existing_scheme() {
        assert_eq!(normalize_url("https://example.com/x").unwrap(), "https://example.com/x");
        assert_eq!(normalize_url("HTTP://example.com").unwrap(), "HTTP://example.com");
    }

    #[test]
    fn rejects_unparseable_targets() {
        for target in ["", "http://", "exa mple.com", "http://[::1"] {
            match normalize_url(target) {
                Err(ScanError::InvalidTarget(_)) => {}
                other => panic!("{:?} should be invalid, got {:?}", target, other),
            }
        }
    }
}
