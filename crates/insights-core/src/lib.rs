//! Core domain for article-insights.
//!
//! Holds the reading-time estimator, the content-item model consumed by the
//! aggregator, date parsing for exported content, output formatting and the
//! CLI settings.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod reading_time;
pub mod settings;

pub use error::{InsightsError, Result};
pub use reading_time::{estimate_reading_time, ReadingTimeEstimator};
