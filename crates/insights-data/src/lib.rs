//! Content ingestion and aggregation layer for article-insights.
//!
//! Discovers and reads exported content trees, flattens them, ranks articles
//! by recency and runs the stats pipeline that pairs each listed article with
//! its reading time.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use insights_core as core;
