use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use fortscan_rs::output::file;
use fortscan_rs::output::report::ReportData;
use fortscan_rs::scanner::PortProbe;
use fortscan_rs::{ResultSummary, ScanCoordinator, ScanError, ScanOptions, ScanType, Severity};

/// 固定开放端口的探测替身，忽略主机
struct FixedProbe {
    open: HashSet<u16>,
    calls: AtomicUsize,
}

impl FixedProbe {
    fn new(open: &[u16]) -> Arc<Self> {
        Arc::new(Self {
            open: open.iter().copied().collect(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl PortProbe for FixedProbe {
    async fn is_open(&self, _host: &str, port: u16, _timeout: Duration) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.open.contains(&port)
    }
}

fn options() -> ScanOptions {
    ScanOptions {
        timeout: Duration::from_millis(500),
        max_parallelism: 4,
        ..Default::default()
    }
}

fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn network_scan_ssh_and_http() {
    let probe = FixedProbe::new(&[22, 80]);
    let coordinator = ScanCoordinator::with_probe(options(), probe.clone());

    let result = coordinator.network_scan("127.0.0.1", "20-22,80").await.unwrap();

    assert_eq!(probe.calls.load(Ordering::SeqCst), 4);
    assert_eq!(result.scan_type, ScanType::Network);
    assert_eq!(result.target, "127.0.0.1");

    let open: HashSet<&str> = result
        .vulnerabilities
        .iter()
        .filter(|v| v.id.starts_with("OPEN-PORT-"))
        .map(|v| v.location.as_str())
        .collect();
    assert_eq!(open, ["tcp/22", "tcp/80"].into_iter().collect());

    assert!(result.vulnerabilities.iter().all(|v| v.id != "SSH-NON-STANDARD-PORT"));

    let exposed: Vec<_> = result
        .vulnerabilities
        .iter()
        .filter(|v| v.name == "Web Server Exposed")
        .collect();
    assert_eq!(exposed.len(), 1);
    assert_eq!(exposed[0].location, "tcp/80");
    assert_eq!(exposed[0].severity, Severity::Info);

    assert_eq!(result.vulnerabilities.len(), 3);
    assert_eq!(result.summary, ResultSummary::from_findings(&result.vulnerabilities));
}

#[tokio::test]
async fn bad_port_spec_aborts_before_probing() {
    let probe = FixedProbe::new(&[22]);
    let coordinator = ScanCoordinator::with_probe(options(), probe.clone());

    let err = coordinator.network_scan("127.0.0.1", "22,ssh").await.unwrap_err();
    assert!(matches!(err, ScanError::Parse { ref token } if token == "ssh"));

    let err = coordinator.full_scan("127.0.0.1", "90-80").await.unwrap_err();
    assert!(matches!(err, ScanError::Parse { .. }));

    assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn full_scan_survives_unreachable_web_server() {
    let probe = FixedProbe::new(&[21, 22]);
    let coordinator = ScanCoordinator::with_probe(options(), probe);
    let target = format!("127.0.0.1:{}", unused_port());

    let result = coordinator.full_scan(&target, "21,22,23").await.unwrap();

    assert_eq!(result.scan_type, ScanType::Full);
    assert_eq!(result.target, target);

    // FTP规则 + 两个开放端口 + 一条Web连接错误
    assert_eq!(result.vulnerabilities.len(), 4);
    let web_errors: Vec<_> = result
        .vulnerabilities
        .iter()
        .filter(|v| v.id == "WEB-CONNECTION-ERROR")
        .collect();
    assert_eq!(web_errors.len(), 1);
    assert_eq!(web_errors[0].severity, Severity::Medium);

    // 网络阶段的发现排在前面
    assert_eq!(result.vulnerabilities.last().unwrap().id, "WEB-CONNECTION-ERROR");

    assert_eq!(
        result.summary,
        ResultSummary { total: 4, critical: 0, high: 0, medium: 2, low: 0, info: 2 }
    );
    assert!(result.start_time <= result.end_time);
}

#[tokio::test]
async fn full_scan_ignores_invalid_web_target() {
    let probe = FixedProbe::new(&[2222]);
    let coordinator = ScanCoordinator::with_probe(options(), probe);

    // 主机名里有空格，端口扫描照常进行，Web阶段因URL无效被跳过
    let result = coordinator.full_scan("bad host", "2222").await.unwrap();

    assert_eq!(result.vulnerabilities.len(), 1);
    assert_eq!(result.vulnerabilities[0].id, "OPEN-PORT-2222");
    assert_eq!(result.summary.total, 1);
}

#[tokio::test]
async fn saved_result_round_trips_through_report_loader() {
    let probe = FixedProbe::new(&[21]);
    let coordinator = ScanCoordinator::with_probe(options(), probe);
    let result = coordinator.network_scan("10.9.8.7", "21").await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.json");
    file::save_json(&path, &result).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["scan_type"], "network");
    assert_eq!(raw["summary"]["total"], 2);
    assert!(raw["vulnerabilities"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v["severity"] == "Medium"));

    match ReportData::load(&path).unwrap() {
        ReportData::Scan(loaded) => assert_eq!(loaded, result),
        other => panic!("expected scan result, got {:?}", other),
    }
}
