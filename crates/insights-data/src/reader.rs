//! Content file discovery and loading.
//!
//! Reads exported content trees (`*.json`) from a directory or a single file
//! and flattens them into [`ContentNode`]s ready for aggregation.

use std::path::{Path, PathBuf};

use insights_core::data_processors::NodeConverter;
use insights_core::error::{InsightsError, Result};
use insights_core::models::ContentNode;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.json` files recursively under `content_path`, sorted by path.
///
/// A path pointing at a single file is returned as-is.
pub fn find_content_files(content_path: &Path) -> Vec<PathBuf> {
    if !content_path.exists() {
        warn!("Content path does not exist: {}", content_path.display());
        return Vec::new();
    }
    if content_path.is_file() {
        return vec![content_path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(content_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load every content tree under `content_path` as a list of root nodes.
///
/// Files that cannot be read or parsed are skipped with a warning. Returns
/// [`InsightsError::ContentPathNotFound`] when the path does not exist.
pub fn load_content_roots(content_path: &Path) -> Result<Vec<ContentNode>> {
    if !content_path.exists() {
        return Err(InsightsError::ContentPathNotFound(content_path.to_path_buf()));
    }

    let files = find_content_files(content_path);
    if files.is_empty() {
        warn!("No content files found in {}", content_path.display());
    }

    let mut roots = Vec::new();
    for file in &files {
        match read_content_file(file) {
            Ok(nodes) => {
                debug!("File {}: {} root nodes", file.display(), nodes.len());
                roots.extend(nodes);
            }
            Err(e) => warn!("Skipping {}: {}", file.display(), e),
        }
    }

    Ok(roots)
}

/// Load all content under `content_path` and flatten it depth-first
/// (each root followed by its descendants, pre-order).
///
/// Returned items carry no children; the tree shape is only kept in
/// [`load_content_roots`].
pub fn load_content_items(content_path: &Path) -> Result<Vec<ContentNode>> {
    let roots = load_content_roots(content_path)?;
    let items: Vec<ContentNode> = flatten(&roots)
        .into_iter()
        .map(ContentNode::detached)
        .collect();
    debug!(
        "Loaded {} content items from {} roots",
        items.len(),
        roots.len()
    );
    Ok(items)
}

/// Descendants-or-self of every root, in tree order.
pub fn flatten(roots: &[ContentNode]) -> Vec<&ContentNode> {
    roots
        .iter()
        .flat_map(ContentNode::descendants_or_self)
        .collect()
}

/// Resolve the content path: use `content_path` when given, otherwise fall
/// back to `~/.article-insights/content`.
pub fn resolve_content_path(content_path: Option<&Path>) -> PathBuf {
    if let Some(p) = content_path {
        return p.to_path_buf();
    }
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".article-insights").join("content")
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn read_content_file(path: &Path) -> Result<Vec<ContentNode>> {
    let content = std::fs::read_to_string(path).map_err(|source| InsightsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    Ok(NodeConverter::convert_document(&value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
