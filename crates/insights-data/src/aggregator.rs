//! Article counting and recency ranking over a flat sequence of content items.

use insights_core::error::{InsightsError, Result};
use insights_core::models::{AggregationResult, ArticleSummary, ContentItem, DEFAULT_TOP_N};
use tracing::debug;

// ── ArticleAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that filters content by type and ranks it by recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleAggregator {
    top_n: usize,
}

impl Default for ArticleAggregator {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ArticleAggregator {
    /// Create an aggregator returning at most `top_n` recent articles.
    ///
    /// Returns [`InsightsError::InvalidArgument`] when `top_n` is negative.
    /// `0` is allowed and yields an empty list with a correct total.
    pub fn new(top_n: i64) -> Result<Self> {
        Ok(Self {
            top_n: validate_top_n(top_n)?,
        })
    }

    /// The configured list cap.
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Count items of `content_type` and return the most recent ones.
    ///
    /// Items are ordered by effective date (publish date, else creation
    /// date) descending. Items sharing an effective date are ordered by
    /// ascending id, so the result does not depend on input order.
    pub fn aggregate<T: ContentItem>(&self, items: &[T], content_type: &str) -> AggregationResult {
        let (total_articles, recent) = self.select_recent(items, content_type);
        AggregationResult {
            total_articles,
            recent_articles: recent.into_iter().map(ArticleSummary::from_item).collect(),
        }
    }

    /// Same filtering and ordering as [`aggregate`](Self::aggregate), but
    /// hands back the matching items themselves.
    ///
    /// Returns `(total_matching, most_recent_items)`.
    pub fn select_recent<'a, T: ContentItem>(
        &self,
        items: &'a [T],
        content_type: &str,
    ) -> (usize, Vec<&'a T>) {
        let mut matching: Vec<&T> = items
            .iter()
            .filter(|item| item.content_type() == content_type)
            .collect();
        let total = matching.len();

        matching.sort_by(|a, b| {
            b.effective_date()
                .cmp(&a.effective_date())
                .then_with(|| a.id().cmp(&b.id()))
        });
        matching.truncate(self.top_n);

        debug!(
            "Matched {} of {} items as '{}', keeping {}",
            total,
            items.len(),
            content_type,
            matching.len()
        );

        (total, matching)
    }
}

/// Count items of `content_type` and return up to `top_n` of the most recent.
///
/// Fails before doing any work when `top_n` is negative.
pub fn rank_articles<T: ContentItem>(
    items: &[T],
    content_type: &str,
    top_n: i64,
) -> Result<AggregationResult> {
    Ok(ArticleAggregator::new(top_n)?.aggregate(items, content_type))
}

fn validate_top_n(top_n: i64) -> Result<usize> {
    if top_n < 0 {
        return Err(InsightsError::invalid_argument(
            "top_n",
            format!("must be >= 0, got {top_n}"),
        ));
    }
    usize::try_from(top_n)
        .map_err(|_| InsightsError::invalid_argument("top_n", format!("{top_n} is too large")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
