use std::time::Duration;
use fortscan_rs::webscan::WebProbe;
use fortscan_rs::{ResultSummary, ScanCoordinator, ScanOptions, ScanType, Severity};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options() -> ScanOptions {
    ScanOptions {
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

#[tokio::test]
async fn missing_headers_and_server_leak() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header("Server", "nginx/1.18"))
        .mount(&mock_server)
        .await;

    let result = ScanCoordinator::new(options())
        .web_scan(&mock_server.uri())
        .await
        .unwrap();

    assert_eq!(result.scan_type, ScanType::Web);
    assert_eq!(result.vulnerabilities.len(), 9);
    assert_eq!(
        result.summary,
        ResultSummary { total: 9, critical: 0, high: 1, medium: 2, low: 5, info: 1 }
    );

    let leak = result
        .vulnerabilities
        .iter()
        .find(|v| v.id == "INFO-SERVER-HEADER-LEAK")
        .unwrap();
    assert!(leak.description.contains("nginx/1.18"));
    assert_eq!(leak.location, "HTTP Headers");
}

#[tokio::test]
async fn hardened_server_only_gets_fixed_findings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Strict-Transport-Security", "max-age=31536000")
                .insert_header("X-Content-Type-Options", "nosniff")
                .insert_header("X-Frame-Options", "DENY")
                .insert_header("Content-Security-Policy", "default-src 'self'")
                .insert_header("X-XSS-Protection", "1; mode=block"),
        )
        .mount(&mock_server)
        .await;

    let probe = WebProbe::new(Duration::from_secs(5)).unwrap();
    let vulns = probe.probe(&mock_server.uri()).await;

    let ids: Vec<&str> = vulns.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["WEB-SQL-INJECTION-POSSIBLE", "WEB-XSS-REFLECTED", "WEB-OUTDATED-SOFTWARE"]
    );
}

#[tokio::test]
async fn follows_a_short_redirect_chain() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/next"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let probe = WebProbe::new(Duration::from_secs(5)).unwrap();
    let vulns = probe.probe(&format!("{}/start", mock_server.uri())).await;

    assert_eq!(vulns.len(), 8);
    assert!(vulns.iter().all(|v| v.id != "WEB-CONNECTION-ERROR"));
}

/// /r0 -> /r1 -> ... -> /r{hops}，最后一跳返回200
async fn redirect_chain(hops: usize) -> MockServer {
    let mock_server = MockServer::start().await;

    for i in 0..hops {
        Mock::given(method("GET"))
            .and(path(format!("/r{}", i)))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", format!("/r{}", i + 1)))
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(format!("/r{}", hops)))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    mock_server
}

#[tokio::test]
async fn follows_exactly_ten_redirects() {
    let mock_server = redirect_chain(10).await;

    let probe = WebProbe::new(Duration::from_secs(5)).unwrap();
    let vulns = probe.probe(&format!("{}/r0", mock_server.uri())).await;

    assert_eq!(vulns.len(), 8);
    assert!(vulns.iter().all(|v| v.id != "WEB-CONNECTION-ERROR"));
}

#[tokio::test]
async fn eleventh_redirect_is_refused() {
    let mock_server = redirect_chain(11).await;

    let probe = WebProbe::new(Duration::from_secs(5)).unwrap();
    let vulns = probe.probe(&format!("{}/r0", mock_server.uri())).await;

    assert_eq!(vulns.len(), 1);
    assert_eq!(vulns[0].id, "WEB-CONNECTION-ERROR");
    assert!(vulns[0].description.contains("too many redirects"));
}

#[tokio::test]
async fn redirect_loop_is_a_connection_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&mock_server)
        .await;

    let probe = WebProbe::new(Duration::from_secs(5)).unwrap();
    let vulns = probe.probe(&format!("{}/loop", mock_server.uri())).await;

    assert_eq!(vulns.len(), 1);
    assert_eq!(vulns[0].id, "WEB-CONNECTION-ERROR");
    assert!(vulns[0].description.contains("too many redirects"));
}

#[tokio::test]
async fn unreachable_server_yields_single_medium_finding() {
    // 绑定后释放，端口上没有服务
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = ScanCoordinator::new(options())
        .web_scan(&format!("127.0.0.1:{}", port))
        .await
        .unwrap();

    assert_eq!(result.target, format!("http://127.0.0.1:{}", port));
    assert_eq!(result.vulnerabilities.len(), 1);
    let vuln = &result.vulnerabilities[0];
    assert_eq!(vuln.name, "Web Server Connection Error");
    assert_eq!(vuln.severity, Severity::Medium);
    assert_eq!(vuln.location, "/");
    assert_eq!(result.summary.medium, 1);
}

#[tokio::test]
async fn invalid_target_fails_web_scan() {
    let err = ScanCoordinator::new(options())
        .web_scan("http://exa mple.com")
        .await
        .unwrap_err();
    assert!(matches!(err, fortscan_rs::ScanError::InvalidTarget(_)));
}
