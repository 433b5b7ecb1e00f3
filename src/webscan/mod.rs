// src/webscan/mod.rs
pub mod headers;
pub mod probe;
pub mod rules;

pub use probe::{normalize_url, WebProbe};
