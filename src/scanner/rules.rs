use crate::models::{Severity, Vulnerability};

/// 根据服务名称和端口给出已知问题
///
/// 返回的发现没有目标和位置，由端口扫描器在发布前补全。
pub fn classify(service: &str, port: u16) -> Vec<Vulnerability> {
    let mut vulns = Vec::new();

    match service {
        "FTP" => {
            vulns.push(
                Vulnerability::new(
                    "FTP-ANONYMOUS-ACCESS",
                    "FTP Anonymous Access",
                    "FTP server might allow anonymous access",
                    Severity::Medium,
                )
                .exploitable(true)
                .with_remediation("Disable anonymous FTP access if not required")
                .with_reference("https://cve.mitre.org/cgi-bin/cvename.cgi?name=CVE-1999-0497"),
            );
        }
        "SSH" if port != 22 => {
            vulns.push(Vulnerability::new(
                "SSH-NON-STANDARD-PORT",
                "SSH on Non-Standard Port",
                format!("SSH service running on non-standard port {}", port),
                Severity::Info,
            ));
        }
        "HTTP" | "HTTPS" => {
            vulns.push(
                Vulnerability::new(
                    "WEB-SERVER-EXPOSED",
                    "Web Server Exposed",
                    format!("Web server detected on port {}", port),
                    Severity::Info,
                )
                .exploitable(true)
                .with_remediation(
                    "Ensure the web server is properly secured and only necessary ports are exposed",
                ),
            );
        }
        _ => {}
    }

    vulns
}
