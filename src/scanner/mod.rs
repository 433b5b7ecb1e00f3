pub mod port;
pub mod rules;
pub mod service;

pub use port::{PortProbe, PortScanner, TcpConnectProbe};
pub use service::{DetectedService, ServiceDetector};
