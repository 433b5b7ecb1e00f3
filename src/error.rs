use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// 端口参数中无法解析的片段
    #[error("invalid port specification: {token}")]
    Parse { token: String },

    /// 补全协议后仍然无法解析的URL
    #[error("invalid URL: {0}")]
    InvalidTarget(String),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("scan worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ScanError {
    pub fn parse(token: impl Into<String>) -> Self {
        ScanError::Parse { token: token.into() }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
