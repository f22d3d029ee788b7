mod bootstrap;
mod output;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use insights_core::reading_time::ReadingTimeEstimator;
use insights_core::settings::{Command, Settings};
use insights_data::aggregator::ArticleAggregator;
use insights_data::analysis::{analyze_content, rank_content};
use insights_data::reader::resolve_content_path;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("article-insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "wpm: {}, top-n: {}, type: {}, format: {}",
        settings.words_per_minute,
        settings.top_n,
        settings.content_type,
        settings.format
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&settings, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Execute the selected subcommand, writing its result to `out`.
fn run(settings: &Settings, out: &mut impl Write) -> Result<()> {
    match &settings.command {
        Command::Estimate { file } => {
            let estimator = ReadingTimeEstimator::new(settings.words_per_minute)?;
            let text = read_text(file.as_deref())?;
            let estimate = estimator.estimate(Some(&text));

            if settings.is_text_output() {
                output::write_estimate_text(out, &estimate)
            } else {
                output::write_json(out, &estimate)
            }
        }

        Command::Rank => {
            let aggregator = ArticleAggregator::new(settings.top_n)?;
            let path = content_path(settings);
            let result = rank_content(&path, &settings.content_type, &aggregator)?;

            if settings.is_text_output() {
                output::write_rank_text(out, &result)
            } else {
                output::write_json(out, &result)
            }
        }

        Command::Stats => {
            let estimator = ReadingTimeEstimator::new(settings.words_per_minute)?;
            let aggregator = ArticleAggregator::new(settings.top_n)?;
            let path = content_path(settings);
            let report = analyze_content(&path, &settings.content_type, &aggregator, &estimator)?;

            if settings.is_text_output() {
                output::write_stats_text(out, &report)
            } else {
                output::write_json(out, &report)
            }
        }
    }
}

/// Explicit `--content-path`, else the first well-known location that
/// exists, else the default location.
fn content_path(settings: &Settings) -> PathBuf {
    let discovered = settings
        .content_path
        .clone()
        .or_else(bootstrap::discover_content_path);
    resolve_content_path(discovered.as_deref())
}

/// Read the whole of `file`, or stdin when no file is given.
///
/// Invalid UTF-8 is replaced rather than rejected.
fn read_text(file: Option<&Path>) -> Result<String> {
    let bytes = match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            bytes
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::InsightsError;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn run_to_string(args: &[&str]) -> Result<String> {
        let settings = Settings::load_from(args);
        let mut buf = Vec::new();
        run(&settings, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    fn write_site(dir: &Path) {
        let articles: Vec<serde_json::Value> = (1..=7)
            .map(|i| {
                serde_json::json!({
                    "id": i,
                    "type": "article",
                    "title": format!("Post {i}"),
                    "url": format!("/blog/post-{i}/"),
                    "createDate": format!("2024-01-{:02}T08:00:00Z", i),
                    "body": format!("<p>{}</p>", vec!["word"; 100 * i].join(" ")),
                })
            })
            .chain((8..=10).map(|i| {
                serde_json::json!({
                    "id": i,
                    "type": "page",
                    "url": format!("/page-{i}/"),
                    "createDate": "2024-02-01T08:00:00Z",
                })
            }))
            .collect();
        let site = serde_json::json!({
            "id": 1000,
            "type": "home",
            "url": "/",
            "createDate": "2023-12-01",
            "children": articles,
        });
        std::fs::write(dir.join("site.json"), site.to_string()).unwrap();
    }

    // ── estimate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_estimate_json_from_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("post.html");
        std::fs::write(&file, vec!["<b>word</b>"; 150].join(" ")).unwrap();

        let text = run_to_string(&[
            "article-insights",
            "--words-per-minute",
            "100",
            "estimate",
            file.to_str().unwrap(),
        ])
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["minutes"], 2);
        assert_eq!(json["label"], "~2 min read");
    }

    #[test]
    fn test_estimate_text_output() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("post.txt");
        std::fs::write(&file, "Hello").unwrap();

        let text = run_to_string(&[
            "article-insights",
            "--format",
            "text",
            "estimate",
            file.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(text, "~1 min read\n");
    }

    #[test]
    fn test_estimate_rejects_zero_wpm() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("post.txt");
        std::fs::write(&file, "Hello").unwrap();

        let err = run_to_string(&[
            "article-insights",
            "--words-per-minute",
            "0",
            "estimate",
            file.to_str().unwrap(),
        ])
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InsightsError>(),
            Some(InsightsError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_estimate_invalid_utf8_still_counts() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("latin1.txt");
        std::fs::write(&file, b"caf\xe9 au lait \xff").unwrap();

        let text = run_to_string(&["article-insights", "estimate", file.to_str().unwrap()]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["minutes"], 1);
        assert_eq!(json["label"], "~1 min read");
    }

    #[test]
    fn test_estimate_missing_file_is_error() {
        let result = run_to_string(&["article-insights", "estimate", "/tmp/no-such-post-xyz.html"]);
        assert!(result.is_err());
    }

    // ── rank ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_rank_json() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());

        let text = run_to_string(&[
            "article-insights",
            "--content-path",
            dir.path().to_str().unwrap(),
            "rank",
        ])
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["totalArticles"], 7);
        let recent = json["recentArticles"].as_array().unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0]["title"], "Post 7");
        assert_eq!(recent[0]["url"], "/blog/post-7/");
        assert_eq!(recent[0]["publishDate"], "2024-01-07T08:00:00Z");
        assert_eq!(recent[4]["title"], "Post 3");
    }

    #[test]
    fn test_rank_negative_top_n_is_error() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());

        let err = run_to_string(&[
            "article-insights",
            "--content-path",
            dir.path().to_str().unwrap(),
            "--top-n",
            "-1",
            "rank",
        ])
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InsightsError>(),
            Some(InsightsError::InvalidArgument { name: "top_n", .. })
        ));
    }

    #[test]
    fn test_rank_custom_content_type_text() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());

        let text = run_to_string(&[
            "article-insights",
            "--content-path",
            dir.path().to_str().unwrap(),
            "--content-type",
            "page",
            "--format",
            "text",
            "rank",
        ])
        .unwrap();
        assert!(text.starts_with("Total Articles: 3\n"));
        assert!(text.contains("01 Feb 2024"));
    }

    #[test]
    fn test_rank_missing_content_path_is_error() {
        let err = run_to_string(&[
            "article-insights",
            "--content-path",
            "/tmp/does-not-exist-insights-xyz",
            "rank",
        ])
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InsightsError>(),
            Some(InsightsError::ContentPathNotFound(_))
        ));
    }

    // ── stats ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_stats_json_includes_reading_times() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());

        let text = run_to_string(&[
            "article-insights",
            "--content-path",
            dir.path().to_str().unwrap(),
            "--words-per-minute",
            "200",
            "--top-n",
            "2",
            "stats",
        ])
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["totalArticles"], 7);
        let recent = json["recentArticles"].as_array().unwrap();
        assert_eq!(recent.len(), 2);
        // Post 7 has 700 words, Post 6 has 600.
        assert_eq!(recent[0]["readingMinutes"], 4);
        assert_eq!(recent[0]["readingLabel"], "~4 min read");
        assert_eq!(recent[1]["readingMinutes"], 3);
    }
}
