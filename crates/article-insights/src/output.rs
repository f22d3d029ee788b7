use std::io::Write;

use insights_core::formatting::{fit_width, format_publish_date};
use insights_core::models::{AggregationResult, ReadingTimeEstimate};
use insights_data::analysis::ArticleStatsReport;

const TITLE_WIDTH: usize = 40;
const DATE_WIDTH: usize = 12;
const READ_WIDTH: usize = 12;

// ── JSON ───────────────────────────────────────────────────────────────────────

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

// ── Text ───────────────────────────────────────────────────────────────────────

pub fn write_estimate_text(out: &mut impl Write, estimate: &ReadingTimeEstimate) -> anyhow::Result<()> {
    writeln!(out, "{}", estimate.label)?;
    Ok(())
}

/// Render the article dashboard: total count and the recently published table.
pub fn write_rank_text(out: &mut impl Write, result: &AggregationResult) -> anyhow::Result<()> {
    write_header(out, result.total_articles)?;
    if result.recent_articles.is_empty() {
        writeln!(out, "No articles found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{} {} View",
        fit_width("Title", TITLE_WIDTH),
        fit_width("Published", DATE_WIDTH)
    )?;
    for article in &result.recent_articles {
        writeln!(
            out,
            "{} {} {}",
            fit_width(&article.title, TITLE_WIDTH),
            fit_width(&format_publish_date(&article.publish_date), DATE_WIDTH),
            article.url
        )?;
    }
    Ok(())
}

/// Dashboard table with an extra reading-time column.
pub fn write_stats_text(out: &mut impl Write, report: &ArticleStatsReport) -> anyhow::Result<()> {
    write_header(out, report.total_articles)?;
    if report.recent_articles.is_empty() {
        writeln!(out, "No articles found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{} {} {} View",
        fit_width("Title", TITLE_WIDTH),
        fit_width("Published", DATE_WIDTH),
        fit_width("Reading", READ_WIDTH)
    )?;
    for article in &report.recent_articles {
        writeln!(
            out,
            "{} {} {} {}",
            fit_width(&article.summary.title, TITLE_WIDTH),
            fit_width(&format_publish_date(&article.summary.publish_date), DATE_WIDTH),
            fit_width(&article.reading_label, READ_WIDTH),
            article.summary.url
        )?;
    }
    Ok(())
}

fn write_header(out: &mut impl Write, total: usize) -> anyhow::Result<()> {
    writeln!(out, "Total Articles: {}", total)?;
    writeln!(out)?;
    writeln!(out, "Recently Published")?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
