use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::warn;

use crate::models::ContentNode;

// ── DateProcessor ─────────────────────────────────────────────────────────────

/// Parses dates from the variety of formats found in exported content files.
pub struct DateProcessor;

impl DateProcessor {
    /// Attempt to parse a [`serde_json::Value`] into a UTC [`DateTime`].
    ///
    /// Handles:
    /// * `null`       → `None`
    /// * JSON string  → RFC 3339 (including `Z`-suffix), RFC 2822, or common
    ///   date-time / date-only patterns (interpreted as UTC).
    /// * JSON number  → Unix timestamp (integer or float seconds).
    pub fn parse(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::Null => None,
            Value::String(s) => Self::parse_str(s.trim()),
            Value::Number(n) => {
                if let Some(secs) = n.as_i64() {
                    DateTime::from_timestamp(secs, 0)
                } else if let Some(f) = n.as_f64() {
                    let secs = f.floor();
                    let nanos = ((f - secs) * 1_000_000_000.0).round() as u32;
                    // Rounding can carry a whole second into the nanos.
                    if nanos >= 1_000_000_000 {
                        DateTime::from_timestamp(secs as i64 + 1, 0)
                    } else {
                        DateTime::from_timestamp(secs as i64, nanos)
                    }
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Parse a date string, see [`DateProcessor::parse`].
    pub fn parse_str(s: &str) -> Option<DateTime<Utc>> {
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Some(dt.with_timezone(&Utc));
        }

        const DATETIME_FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%d/%m/%Y %H:%M:%S",
        ];
        const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

        for fmt in DATETIME_FORMATS {
            if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
                let naive = date.and_hms_opt(0, 0, 0)?;
                return Some(Utc.from_utc_datetime(&naive));
            }
        }

        warn!("DateProcessor: could not parse date string \"{}\"", s);
        None
    }
}

// ── NodeConverter ─────────────────────────────────────────────────────────────

/// Builds [`ContentNode`] trees from loosely-shaped JSON exports.
///
/// Accepts both camelCase and snake_case keys. Nodes missing an id, a type
/// or a parseable creation date are dropped; their children are kept and
/// take the dropped node's place in the tree.
pub struct NodeConverter;

impl NodeConverter {
    /// Convert one JSON node (and its subtree).
    ///
    /// Returns the converted node, or its promoted children when the node
    /// itself is invalid.
    pub fn convert(value: &Value) -> Vec<ContentNode> {
        let children: Vec<ContentNode> = value
            .get("children")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().flat_map(Self::convert).collect())
            .unwrap_or_default();

        let Some(id) = Self::extract_id(value) else {
            warn!("Skipping content node without a numeric id");
            return children;
        };

        let Some(content_type) = Self::extract_str(value, &["type", "contentType", "content_type"])
        else {
            warn!("Skipping content node {} without a type", id);
            return children;
        };

        let Some(create_date) = Self::extract_date(value, &["createDate", "create_date"]) else {
            warn!("Skipping content node {} without a valid createDate", id);
            return children;
        };

        let publish_date = Self::extract_date(value, &["publishDate", "publish_date"]);

        vec![ContentNode {
            id,
            content_type,
            name: Self::extract_str(value, &["name"]),
            title: Self::extract_str(value, &["title"]),
            url: Self::extract_str(value, &["url"]).unwrap_or_default(),
            publish_date,
            create_date,
            body: Self::extract_str(value, &["body", "bodyText", "body_text"]),
            children,
        }]
    }

    /// Convert a document holding either one root node or an array of roots.
    pub fn convert_document(value: &Value) -> Vec<ContentNode> {
        match value {
            Value::Array(roots) => roots.iter().flat_map(Self::convert).collect(),
            Value::Object(_) => Self::convert(value),
            _ => {
                warn!("Content document is neither an object nor an array");
                Vec::new()
            }
        }
    }

    fn extract_id(value: &Value) -> Option<u64> {
        match value.get("id")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// First non-blank string under any of `keys`.
    fn extract_str(value: &Value, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|k| value.get(*k).and_then(Value::as_str))
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    }

    fn extract_date(value: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
        keys.iter()
            .find_map(|k| value.get(*k))
            .and_then(DateProcessor::parse)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    // ── DateProcessor ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_null_is_none() {
        assert!(DateProcessor::parse(&Value::Null).is_none());
    }

    #[test]
    fn test_parse_rfc3339_z_suffix() {
        let dt = DateProcessor::parse(&json!("2024-03-05T12:30:00Z")).unwrap();
        assert_eq!(dt, utc(2024, 3, 5, 12, 30, 0));
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = DateProcessor::parse(&json!("2024-03-05T14:30:00+02:00")).unwrap();
        assert_eq!(dt, utc(2024, 3, 5, 12, 30, 0));
    }

    #[test]
    fn test_parse_naive_datetime_as_utc() {
        let dt = DateProcessor::parse(&json!("2024-03-05T12:30:00")).unwrap();
        assert_eq!(dt, utc(2024, 3, 5, 12, 30, 0));
        let dt = DateProcessor::parse(&json!("2024-03-05 12:30:00.250")).unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_date_only() {
        let dt = DateProcessor::parse(&json!("2024-03-05")).unwrap();
        assert_eq!(dt, utc(2024, 3, 5, 0, 0, 0));
    }

    #[test]
    fn test_parse_unix_seconds() {
        let dt = DateProcessor::parse(&json!(1_700_000_000)).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_parse_negative_float_seconds() {
        let dt = DateProcessor::parse(&json!(-1.5)).unwrap();
        assert_eq!(dt.timestamp(), -2);
        assert_eq!(dt.timestamp_subsec_nanos(), 500_000_000);

        let dt = DateProcessor::parse(&json!(1.25)).unwrap();
        assert_eq!(dt.timestamp(), 1);
        assert_eq!(dt.timestamp_subsec_nanos(), 250_000_000);
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(DateProcessor::parse(&json!("next tuesday")).is_none());
        assert!(DateProcessor::parse(&json!("")).is_none());
        assert!(DateProcessor::parse(&json!(true)).is_none());
    }

    // ── NodeConverter ────────────────────────────────────────────────────────

    #[test]
    fn test_convert_full_node() {
        let nodes = NodeConverter::convert(&json!({
            "id": 1001,
            "type": "article",
            "name": "my-post",
            "title": "My Post",
            "url": "/blog/my-post/",
            "publishDate": "2024-02-01T08:00:00Z",
            "createDate": "2024-01-20T10:00:00Z",
            "body": "<p>Hello world</p>",
        }));
        assert_eq!(nodes.len(), 1);
        let node = &nodes[0];
        assert_eq!(node.id, 1001);
        assert_eq!(node.content_type, "article");
        assert_eq!(node.title.as_deref(), Some("My Post"));
        assert_eq!(node.name.as_deref(), Some("my-post"));
        assert_eq!(node.url, "/blog/my-post/");
        assert_eq!(node.publish_date, Some(utc(2024, 2, 1, 8, 0, 0)));
        assert_eq!(node.create_date, utc(2024, 1, 20, 10, 0, 0));
        assert_eq!(node.body.as_deref(), Some("<p>Hello world</p>"));
    }

    #[test]
    fn test_convert_snake_case_keys_and_string_id() {
        let nodes = NodeConverter::convert(&json!({
            "id": "42",
            "content_type": "page",
            "create_date": "2024-01-01",
            "publish_date": null,
        }));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, 42);
        assert_eq!(nodes[0].content_type, "page");
        assert!(nodes[0].publish_date.is_none());
        assert_eq!(nodes[0].url, "");
    }

    #[test]
    fn test_convert_bad_publish_date_is_absent() {
        let nodes = NodeConverter::convert(&json!({
            "id": 1,
            "type": "article",
            "createDate": "2024-01-01T00:00:00Z",
            "publishDate": "soon",
        }));
        assert!(nodes[0].publish_date.is_none());
    }

    #[test]
    fn test_convert_blank_title_is_absent() {
        let nodes = NodeConverter::convert(&json!({
            "id": 1,
            "type": "article",
            "name": "my-post",
            "title": "  ",
            "createDate": "2024-01-01",
        }));
        assert!(nodes[0].title.is_none());
        assert_eq!(nodes[0].name.as_deref(), Some("my-post"));
    }

    #[test]
    fn test_convert_invalid_node_promotes_children() {
        let nodes = NodeConverter::convert(&json!({
            "id": 1,
            "type": "folder",
            "createDate": "not a date",
            "children": [
                {"id": 2, "type": "article", "createDate": "2024-01-01"},
                {"id": 3, "type": "article", "createDate": "2024-01-02"},
            ],
        }));
        let ids: Vec<u64> = nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_convert_nested_children() {
        let nodes = NodeConverter::convert(&json!({
            "id": 1,
            "type": "home",
            "createDate": "2024-01-01",
            "children": [{
                "id": 2,
                "type": "blog",
                "createDate": "2024-01-01",
                "children": [{"id": 3, "type": "article", "createDate": "2024-01-01"}],
            }],
        }));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0].children[0].id, 3);
    }

    #[test]
    fn test_convert_document_array_of_roots() {
        let nodes = NodeConverter::convert_document(&json!([
            {"id": 1, "type": "home", "createDate": "2024-01-01"},
            {"id": 2, "type": "home", "createDate": "2024-01-01"},
        ]));
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_convert_document_scalar_is_empty() {
        assert!(NodeConverter::convert_document(&json!(17)).is_empty());
    }
}
