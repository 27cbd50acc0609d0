//! External service interactions
//!
//! This module contains services for reaching outside the process:
//! - Dataset file loading (JSON and CSV)
//! - Background dataset fetching

pub mod dataset;
pub mod fetcher;

pub use fetcher::{DatasetFetcher, FetchResult};
