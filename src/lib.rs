// src/lib.rs
//! # fortscan-rs
//!
//! 轻量级侦察扫描：并发探测TCP端口、识别服务、检查Web安全响应头，
//! 把所有发现按严重程度汇总成一个 [`ScanResult`]。
//!
//! ```no_run
//! use fortscan_rs::{ScanCoordinator, ScanOptions};
//!
//! # async fn run() -> Result<(), fortscan_rs::ScanError> {
//! let coordinator = ScanCoordinator::new(ScanOptions::default());
//! let result = coordinator.full_scan("192.168.1.10", "1-1024").await?;
//! assert_eq!(result.summary.total, result.vulnerabilities.len());
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod coordinator;
pub mod doc;
pub mod error;
pub mod models;
pub mod output;
pub mod scanner;
pub mod webscan;

pub use coordinator::{ScanCoordinator, ScanOptions};
pub use error::ScanError;
pub use models::{ExploitResult, ResultSummary, ScanResult, ScanType, Severity, Vulnerability};
