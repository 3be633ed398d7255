//! # TextAttack Datasets
#![forbid(unsafe_code)]

/// Configuration
pub mod config;

/// Datasets
pub mod datasets;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;

pub use config::Config;
pub use datasets::{DatasetError, LoadableDataset, Sample};
