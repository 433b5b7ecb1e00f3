use crate::models::{Severity, Vulnerability};

/// 固定的演示性Web漏洞，不依赖实际请求内容
// TODO: 用真实的注入/XSS检测替换这三条占位结果，届时 recursive 参数用于爬取子页面
pub fn common_web_vulnerabilities(target: &str) -> Vec<Vulnerability> {
    vec![
        Vulnerability::new(
            "WEB-SQL-INJECTION-POSSIBLE",
            "Possible SQL Injection",
            "Input parameters on the website may be vulnerable to SQL injection attacks",
            Severity::High,
        )
        .exploitable(true)
        .with_evidence("Error messages containing SQL syntax were observed")
        .with_remediation("Use parameterized queries or prepared statements")
        .with_reference("https://owasp.org/www-community/attacks/SQL_Injection")
        .stamped(target, "/login"),
        Vulnerability::new(
            "WEB-XSS-REFLECTED",
            "Reflected Cross-Site Scripting (XSS)",
            "Some parameters on the website may be vulnerable to reflected XSS attacks",
            Severity::Medium,
        )
        .exploitable(true)
        .with_evidence("Injected script was executed when included in search parameter")
        .with_remediation("Implement proper output encoding and content security policy")
        .with_reference("https://owasp.org/www-community/attacks/xss/")
        .stamped(target, "/search"),
        Vulnerability::new(
            "WEB-OUTDATED-SOFTWARE",
            "Outdated Web Server Software",
            "The web server appears to be running an outdated version",
            Severity::Medium,
        )
        .with_remediation("Update the web server software to the latest stable version")
        .stamped(target, "/"),
    ]
}
