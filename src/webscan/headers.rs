use reqwest::header::{HeaderMap, SERVER};
use crate::models::{Severity, Vulnerability};

pub const HEADERS_LOCATION: &str = "HTTP Headers";

struct SecurityHeader {
    name: &'static str,
    id: &'static str,
    description: &'static str,
    remediation: &'static str,
}

const SECURITY_HEADERS: [SecurityHeader; 5] = [
    SecurityHeader {
        name: "Strict-Transport-Security",
        id: "SECURITY-HEADER-HSTS-MISSING",
        description: "HTTP Strict Transport Security header is missing",
        remediation: "Add 'Strict-Transport-Security' header with appropriate max-age",
    },
    SecurityHeader {
        name: "X-Content-Type-Options",
        id: "SECURITY-HEADER-X-CONTENT-TYPE-OPTIONS-MISSING",
        description: "X-Content-Type-Options header is missing",
        remediation: "Add 'X-Content-Type-Options: nosniff' header",
    },
    SecurityHeader {
        name: "X-Frame-Options",
        id: "SECURITY-HEADER-X-FRAME-OPTIONS-MISSING",
        description: "X-Frame-Options header is missing",
        remediation: "Add 'X-Frame-Options: DENY' or 'X-Frame-Options: SAMEORIGIN' header",
    },
    SecurityHeader {
        name: "Content-Security-Policy",
        id: "SECURITY-HEADER-CSP-MISSING",
        description: "Content-Security-Policy header is missing",
        remediation: "Implement a Content Security Policy appropriate for your application",
    },
    SecurityHeader {
        name: "X-XSS-Protection",
        id: "SECURITY-HEADER-XSS-PROTECTION-MISSING",
        description: "X-XSS-Protection header is missing",
        remediation: "Add 'X-XSS-Protection: 1; mode=block' header",
    },
];

/// 检查缺失的安全响应头和 Server 头泄露
pub fn check_headers(headers: &HeaderMap, target: &str) -> Vec<Vulnerability> {
    let mut vulns = Vec::new();

    for header in SECURITY_HEADERS.iter() {
        if headers.contains_key(header.name) {
            continue;
        }

        vulns.push(
            Vulnerability::new(
                header.id,
                format!("Missing {} Header", header.name),
                header.description,
                Severity::Low,
            )
            .with_remediation(header.remediation)
            .stamped(target, HEADERS_LOCATION),
        );
    }

    let server = headers
        .get(SERVER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if let Some(server) = server {
        vulns.push(
            Vulnerability::new(
                "INFO-SERVER-HEADER-LEAK",
                "Server Header Information Leakage",
                format!("Server header discloses technology information: {}", server),
                Severity::Info,
            )
            .with_remediation("Configure your web server to suppress or modify the Server header")
            .stamped(target, HEADERS_LOCATION),
        );
    }

    vulns
}
