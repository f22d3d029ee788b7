use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{InsightsError, Result};
use crate::formatting::format_reading_label;
use crate::models::ReadingTimeEstimate;

/// Average adult silent reading speed (Rayner et al., 2016).
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 238;

/// Matches `<` followed by one or more non-`>` characters and a closing `>`.
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("regex is valid"));

// ── ReadingTimeEstimator ──────────────────────────────────────────────────────

/// Estimates reading time at a fixed words-per-minute rate.
///
/// Holds nothing but its configured speed, so a single instance can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTimeEstimator {
    words_per_minute: u32,
}

impl Default for ReadingTimeEstimator {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

impl ReadingTimeEstimator {
    /// Create an estimator for the given reading speed.
    ///
    /// Returns [`InsightsError::InvalidArgument`] when `words_per_minute` is
    /// zero or negative.
    pub fn new(words_per_minute: i64) -> Result<Self> {
        if words_per_minute <= 0 {
            return Err(InsightsError::invalid_argument(
                "words_per_minute",
                format!("must be > 0, got {words_per_minute}"),
            ));
        }
        let words_per_minute = u32::try_from(words_per_minute).map_err(|_| {
            InsightsError::invalid_argument(
                "words_per_minute",
                format!("must be at most {}, got {words_per_minute}", u32::MAX),
            )
        })?;
        Ok(Self { words_per_minute })
    }

    /// The configured reading speed.
    pub fn words_per_minute(&self) -> u32 {
        self.words_per_minute
    }

    /// Estimated reading time in whole minutes.
    ///
    /// * `None`, empty or whitespace-only text → `0`.
    /// * Anything else → `ceil(words / wpm)`, but never less than `1`.
    ///
    /// HTML tags are replaced by a space before words are counted.
    pub fn calculate(&self, text: Option<&str>) -> u32 {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return 0;
        };

        let words = count_words(text);
        let minutes = words.div_ceil(u64::from(self.words_per_minute));
        debug!(
            "Counted {} words at {} wpm -> {} min",
            words, self.words_per_minute, minutes
        );

        u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
    }

    /// Human-readable label, e.g. `"~3 min read"`.
    pub fn label(&self, text: Option<&str>) -> String {
        format_reading_label(self.calculate(text))
    }

    /// Minutes and label in one call.
    pub fn estimate(&self, text: Option<&str>) -> ReadingTimeEstimate {
        let minutes = self.calculate(text);
        ReadingTimeEstimate {
            minutes,
            label: format_reading_label(minutes),
        }
    }
}

/// One-shot estimate at an explicit reading speed.
///
/// Fails only when `words_per_minute` is not positive.
pub fn estimate_reading_time(
    text: Option<&str>,
    words_per_minute: i64,
) -> Result<ReadingTimeEstimate> {
    Ok(ReadingTimeEstimator::new(words_per_minute)?.estimate(text))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Count whitespace-separated words after replacing tags with spaces.
fn count_words(text: &str) -> u64 {
    let plain = HTML_TAG.replace_all(text, " ");
    plain.split_whitespace().count() as u64
}

// ── Tests ──────────────────────────────────────────────────────────────────────
