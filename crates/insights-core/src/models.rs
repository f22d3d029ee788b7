use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of recent articles listed when no cap is given.
pub const DEFAULT_TOP_N: usize = 5;

/// Read-only view of a content item owned by the host's content store.
///
/// The aggregator only needs these accessors; how items are stored or
/// traversed is up to the implementor.
pub trait ContentItem {
    /// Stable identifier, used to break ties between equal dates.
    fn id(&self) -> u64;
    /// Content type alias, e.g. `"article"`.
    fn content_type(&self) -> &str;
    /// Explicit editorial title, if one was set.
    fn title(&self) -> Option<&str>;
    /// Node name as shown in the content tree.
    fn name(&self) -> Option<&str>;
    /// Canonical URL of the item.
    fn url(&self) -> &str;
    /// Editorial publish date, if one was set.
    fn publish_date(&self) -> Option<DateTime<Utc>>;
    /// Creation timestamp. Always present.
    fn create_date(&self) -> DateTime<Utc>;

    /// Publish date when present, otherwise the creation date.
    fn effective_date(&self) -> DateTime<Utc> {
        self.publish_date().unwrap_or_else(|| self.create_date())
    }

    /// Title fallback chain: explicit title, then node name, then `""`.
    ///
    /// A blank title or name counts as unset.
    fn display_title(&self) -> &str {
        let present = |s: &&str| !s.trim().is_empty();
        self.title()
            .filter(present)
            .or_else(|| self.name().filter(present))
            .unwrap_or_default()
    }
}

/// A node in a content tree, as loaded from the host's content files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    /// Numeric node identifier.
    pub id: u64,
    /// Content type alias.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Node name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Editorial title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Canonical URL.
    #[serde(default)]
    pub url: String,
    /// Editorial publish date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub create_date: DateTime<Utc>,
    /// Rich-text body, usually HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Child nodes in tree order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// This node followed by all of its descendants, depth-first pre-order.
    pub fn descendants_or_self(&self) -> Vec<&ContentNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Copy of this node without its subtree.
    pub fn detached(&self) -> ContentNode {
        ContentNode {
            id: self.id,
            content_type: self.content_type.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            publish_date: self.publish_date,
            create_date: self.create_date,
            body: self.body.clone(),
            children: Vec::new(),
        }
    }
}

impl ContentItem for ContentNode {
    fn id(&self) -> u64 {
        self.id
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn publish_date(&self) -> Option<DateTime<Utc>> {
        self.publish_date
    }

    fn create_date(&self) -> DateTime<Utc> {
        self.create_date
    }
}

impl<T: ContentItem + ?Sized> ContentItem for &T {
    fn id(&self) -> u64 {
        (**self).id()
    }

    fn content_type(&self) -> &str {
        (**self).content_type()
    }

    fn title(&self) -> Option<&str> {
        (**self).title()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn url(&self) -> &str {
        (**self).url()
    }

    fn publish_date(&self) -> Option<DateTime<Utc>> {
        (**self).publish_date()
    }

    fn create_date(&self) -> DateTime<Utc> {
        (**self).create_date()
    }
}

/// One row of the "recently published" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub title: String,
    pub url: String,
    /// Effective date of the article (publish date or creation date).
    pub publish_date: DateTime<Utc>,
}

impl ArticleSummary {
    /// Build a summary from any content item using the title fallback chain.
    pub fn from_item<T: ContentItem + ?Sized>(item: &T) -> Self {
        Self {
            title: item.display_title().to_string(),
            url: item.url().to_string(),
            publish_date: item.effective_date(),
        }
    }
}

/// Article count plus the most recent articles, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    /// Number of items matching the type filter, independent of the cap.
    pub total_articles: usize,
    /// At most `top_n` summaries ordered by effective date descending.
    pub recent_articles: Vec<ArticleSummary>,
}

/// Minute count and display label for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingTimeEstimate {
    pub minutes: u32,
    pub label: String,
}

/// A recent article together with its reading time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleReadingStats {
    #[serde(flatten)]
    pub summary: ArticleSummary,
    pub reading_minutes: u32,
    pub reading_label: String,
}

// ── Tests ──────────────────────────────────────────────────────────────────────
