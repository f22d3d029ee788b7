use chrono::{DateTime, Utc};

/// Format a minute count as a reading-time label.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::format_reading_label;
///
/// assert_eq!(format_reading_label(1), "~1 min read");
/// assert_eq!(format_reading_label(12), "~12 min read");
/// assert_eq!(format_reading_label(0), "~0 min read");
/// ```
pub fn format_reading_label(minutes: u32) -> String {
    if minutes == 1 {
        "~1 min read".to_string()
    } else {
        format!("~{} min read", minutes)
    }
}

/// Format a publish date the way the article dashboard shows it: `05 Mar 2024`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use insights_core::formatting::format_publish_date;
///
/// let date = Utc.with_ymd_and_hms(2024, 3, 5, 18, 45, 0).unwrap();
/// assert_eq!(format_publish_date(&date), "05 Mar 2024");
/// ```
pub fn format_publish_date(date: &DateTime<Utc>) -> String {
    date.format("%d %b %Y").to_string()
}

/// Pad or truncate `s` to exactly `width` characters.
///
/// Truncated values end with `…`.
///
/// # Examples
///
/// ```
/// use insights_core::formatting::fit_width;
///
/// assert_eq!(fit_width("abc", 5), "abc  ");
/// assert_eq!(fit_width("abcdefgh", 5), "abcd…");
/// ```
pub fn fit_width(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len <= width {
        return format!("{:<width$}", s, width = width);
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
