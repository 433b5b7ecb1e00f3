// src/output/mod.rs
pub mod console;
pub mod file;
pub mod report;
