//! Content models and normalization rules shared by the VyomGarud site tools.
//!
//! Raw article/category records come from a headless CMS or from fixtures in
//! one of several shapes. [`normalize`] turns them into the canonical records
//! defined here, [`filter`] derives per-category and per-query views from
//! those, and [`view`] assembles the blog page model.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod cms;
pub mod filter;
pub mod fixtures;
pub mod normalize;
pub mod raw;
pub mod slug;
pub mod source;
pub mod view;

pub use filter::{filter_articles, filter_categories_by_query};
pub use normalize::{
    normalize_article, normalize_category, resolve_category_name, resolve_thumbnail,
    NormalizeDefaults, Normalizer,
};
pub use slug::slugify;
pub use source::{ContentOutcome, ContentSource, EmptyReason};

/// Article identifier as sent by the content source: numeric for the CMS,
/// free-form text for hand-written fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    /// Numeric primary key.
    Number(i64),
    /// Text identifier.
    Text(String),
}

impl ArticleId {
    /// Read an id from a raw JSON value. Blank strings and non-integral
    /// numbers are not ids.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(ArticleId::Number),
            Value::String(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| ArticleId::Text(text.to_string()))
            },
            _ => None,
        }
    }

    /// JSON form of the id, used when a canonical record is written back out
    /// as a flat raw record.
    pub fn to_value(&self) -> Value {
        match self {
            ArticleId::Number(number) => Value::from(*number),
            ArticleId::Text(text) => Value::from(text.as_str()),
        }
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Number(number) => write!(f, "{number}"),
            ArticleId::Text(text) => f.write_str(text),
        }
    }
}

// 规范化后的文章（所有页面统一使用）
/// The single article shape used by every consumer.
///
/// `title`, `slug`, `thumbnail_url`, `category_name`, `category_slug`,
/// `author_name` and `read_time` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalArticle {
    pub id: ArticleId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub thumbnail_url: String,
    pub category_name: String,
    pub category_slug: String,
    pub author_name: String,
    pub read_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl CanonicalArticle {
    /// Write the record back out in the flat raw shape. Normalizing the
    /// result reproduces `self`.
    pub fn to_flat_raw(&self) -> Value {
        let mut raw = serde_json::Map::new();
        raw.insert("id".to_string(), self.id.to_value());
        raw.insert("title".to_string(), Value::from(self.title.as_str()));
        raw.insert("slug".to_string(), Value::from(self.slug.as_str()));
        raw.insert("excerpt".to_string(), Value::from(self.excerpt.as_str()));
        if let Some(content) = &self.content {
            raw.insert("content".to_string(), Value::from(content.as_str()));
        }
        raw.insert("thumbnail".to_string(), Value::from(self.thumbnail_url.as_str()));
        raw.insert(
            "category".to_string(),
            serde_json::json!({ "name": self.category_name, "slug": self.category_slug }),
        );
        raw.insert("authorName".to_string(), Value::from(self.author_name.as_str()));
        raw.insert("readTime".to_string(), Value::from(self.read_time.as_str()));
        if let Some(published_at) = &self.published_at {
            raw.insert("publishedAt".to_string(), Value::from(published_at.as_str()));
        }
        Value::Object(raw)
    }
}

// Category 结构体
/// A category with a display identity. Nameless raw categories never become
/// one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ArticleId>,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// Category listing entry with the number of articles filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub count: usize,
}
