//! Content sources and the explicit outcome of fetching from them.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{fixtures, normalize::Normalizer};

/// Why a source produced no records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum EmptyReason {
    /// The source answered successfully with nothing in it.
    NoRecords,
    /// The request never completed (connect, DNS, timeout, body read).
    Unreachable(String),
    /// The source answered with a non-success status.
    Status(u16),
    /// The body was not the expected `{ "data": [...] }` document.
    Malformed(String),
}

impl EmptyReason {
    /// True when the source itself failed, as opposed to holding no content.
    pub fn is_failure(&self) -> bool {
        !matches!(self, EmptyReason::NoRecords)
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoRecords => f.write_str("no records"),
            EmptyReason::Unreachable(detail) => write!(f, "content source unreachable: {detail}"),
            EmptyReason::Status(status) => write!(f, "content source returned HTTP {status}"),
            EmptyReason::Malformed(detail) => write!(f, "malformed content response: {detail}"),
        }
    }
}

/// Result of asking a source for records: either some raw records or an
/// explicit reason there are none.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentOutcome {
    Loaded(Vec<Value>),
    Empty(EmptyReason),
}

impl ContentOutcome {
    /// `Loaded` for a non-empty list, `Empty(NoRecords)` otherwise.
    pub fn from_records(records: Vec<Value>) -> Self {
        if records.is_empty() {
            ContentOutcome::Empty(EmptyReason::NoRecords)
        } else {
            ContentOutcome::Loaded(records)
        }
    }

    pub fn records(&self) -> &[Value] {
        match self {
            ContentOutcome::Loaded(records) => records,
            ContentOutcome::Empty(_) => &[],
        }
    }

    pub fn into_records(self) -> Vec<Value> {
        match self {
            ContentOutcome::Loaded(records) => records,
            ContentOutcome::Empty(_) => Vec::new(),
        }
    }

    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            ContentOutcome::Loaded(_) => None,
            ContentOutcome::Empty(reason) => Some(reason),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ContentOutcome::Loaded(_))
    }
}

/// Server-side narrowing a source may apply to the article list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleQuery {
    /// Exact category display name.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl ArticleQuery {
    pub fn by_category(name: impl Into<String>) -> Self {
        Self {
            category: Some(name.into()),
            slug: None,
        }
    }

    pub fn by_slug(slug: impl Into<String>) -> Self {
        Self {
            category: None,
            slug: Some(slug.into()),
        }
    }
}

/// Anything that can hand over raw article and category records.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn articles(&self, query: &ArticleQuery) -> ContentOutcome;

    async fn categories(&self) -> ContentOutcome;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// Built-in sample records, used offline and when no CMS is configured.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    normalizer: Normalizer,
}

impl FixtureSource {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
        }
    }

    fn matches(&self, raw: &Value, query: &ArticleQuery) -> bool {
        let article = self.normalizer.article(raw);
        let category_ok = query
            .category
            .as_deref()
            .map_or(true, |name| {
                article.category_name.to_lowercase() == name.trim().to_lowercase()
            });
        let slug_ok = query
            .slug
            .as_deref()
            .map_or(true, |slug| article.slug == slug.trim());
        category_ok && slug_ok
    }
}

#[async_trait]
impl ContentSource for FixtureSource {
    async fn articles(&self, query: &ArticleQuery) -> ContentOutcome {
        let records = fixtures::sample_articles()
            .into_iter()
            .filter(|raw| self.matches(raw, query))
            .collect();
        ContentOutcome::from_records(records)
    }

    async fn categories(&self) -> ContentOutcome {
        ContentOutcome::from_records(fixtures::sample_categories())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
