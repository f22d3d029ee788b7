//! Content analysis pipeline.
//!
//! Loads the exported content tree, ranks the articles and attaches a
//! reading time to each one listed.

use std::path::Path;

use insights_core::error::Result;
use insights_core::models::{AggregationResult, ArticleReadingStats, ArticleSummary, ContentNode};
use insights_core::reading_time::ReadingTimeEstimator;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregator::ArticleAggregator;
use crate::reader::load_content_items;

// ── Public types ──────────────────────────────────────────────────────────────

/// Article count plus the most recent articles with their reading times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStatsReport {
    pub total_articles: usize,
    pub recent_articles: Vec<ArticleReadingStats>,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Load content from `content_path` and rank items of `content_type`.
pub fn rank_content(
    content_path: &Path,
    content_type: &str,
    aggregator: &ArticleAggregator,
) -> Result<AggregationResult> {
    let items = load_content_items(content_path)?;
    let result = aggregator.aggregate(&items, content_type);
    info!(
        "Found {} '{}' items under {}",
        result.total_articles,
        content_type,
        content_path.display()
    );
    Ok(result)
}

/// Load content from `content_path`, rank items of `content_type` and
/// estimate the reading time of every listed article's body.
pub fn analyze_content(
    content_path: &Path,
    content_type: &str,
    aggregator: &ArticleAggregator,
    estimator: &ReadingTimeEstimator,
) -> Result<ArticleStatsReport> {
    let items = load_content_items(content_path)?;
    let report = build_report(&items, content_type, aggregator, estimator);
    info!(
        "Found {} '{}' items under {}",
        report.total_articles,
        content_type,
        content_path.display()
    );
    Ok(report)
}

/// In-memory half of [`analyze_content`].
pub fn build_report(
    items: &[ContentNode],
    content_type: &str,
    aggregator: &ArticleAggregator,
    estimator: &ReadingTimeEstimator,
) -> ArticleStatsReport {
    let (total_articles, recent) = aggregator.select_recent(items, content_type);

    let recent_articles = recent
        .into_iter()
        .map(|node| {
            let estimate = estimator.estimate(node.body.as_deref());
            ArticleReadingStats {
                summary: ArticleSummary::from_item(node),
                reading_minutes: estimate.minutes,
                reading_label: estimate.label,
            }
        })
        .collect();

    ArticleStatsReport {
        total_articles,
        recent_articles,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
