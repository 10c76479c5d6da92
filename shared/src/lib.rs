//! Shared types and configuration for libcsv
//!
//! This crate contains the configuration model and the table vocabulary used
//! across the processing pipeline, the runtime host, and the CLI.

pub mod config;
pub mod types;

// Re-export commonly used types
pub use config::{LibcsvConfig, ProcessorConfig, RuntimeConfig};
pub use types::{Headers, Row};
