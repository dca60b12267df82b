//! Content Normalizer: raw article/category records to canonical records.
//!
//! Every field resolves independently through its accessor chain and falls
//! back to a default; nothing here returns an error or panics.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::{
    raw::{non_empty_str, str_at, Accessor, RawShape},
    slug::slugify,
    ArticleId, CanonicalArticle, CanonicalCategory,
};

/// Image path used when a record carries no usable absolute image URL.
pub const PLACEHOLDER_THUMBNAIL: &str = "/placeholder-post.png";
pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_AUTHOR: &str = "Unknown Author";
pub const DEFAULT_READ_TIME: &str = "5 min";

const ID: &[Accessor] = &[Accessor::Root("/id"), Accessor::Cms("/id")];
const TITLE: &[Accessor] = &[Accessor::Cms("/title"), Accessor::Flat("/title")];
const SLUG: &[Accessor] = &[Accessor::Cms("/slug"), Accessor::Flat("/slug")];
const EXCERPT: &[Accessor] = &[Accessor::Cms("/excerpt"), Accessor::Flat("/excerpt")];
const CONTENT: &[Accessor] = &[Accessor::Cms("/content"), Accessor::Flat("/content")];
const THUMBNAIL: &[Accessor] = &[
    Accessor::Cms("/featuredImage"),
    Accessor::Flat("/thumbnail"),
    Accessor::Flat("/featuredImage"),
    Accessor::Flat("/thumbnailUrl"),
];
const CATEGORY: &[Accessor] = &[Accessor::Cms("/category"), Accessor::Flat("/category")];
// Canonical output read back in: `categoryName` / `categorySlug`.
const CATEGORY_NAME: &[Accessor] = &[Accessor::Flat("/categoryName")];
const CATEGORY_SLUG: &[Accessor] = &[Accessor::Flat("/categorySlug")];
const AUTHOR: &[Accessor] = &[
    Accessor::Cms("/author"),
    Accessor::Flat("/authorName"),
    Accessor::Flat("/author"),
];
const READ_TIME: &[Accessor] = &[Accessor::Cms("/readTime"), Accessor::Flat("/readTime")];
const PUBLISHED_AT: &[Accessor] = &[
    Accessor::Cms("/publishedAt"),
    Accessor::Flat("/publishedAt"),
    Accessor::Cms("/createdAt"),
    Accessor::Flat("/createdAt"),
];
const DESCRIPTION: &[Accessor] =
    &[Accessor::Cms("/description"), Accessor::Flat("/description")];

/// Fallback values for the fields whose default differs between pages.
///
/// Blank values are replaced by the built-in defaults when a [`Normalizer`]
/// is built, so required canonical fields stay non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeDefaults {
    pub title: String,
    pub excerpt: String,
    pub thumbnail: String,
}

impl Default for NormalizeDefaults {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            excerpt: String::new(),
            thumbnail: PLACEHOLDER_THUMBNAIL.to_string(),
        }
    }
}

/// The one article/category normalizer. Stateless apart from its defaults,
/// so it can be shared freely between concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    defaults: NormalizeDefaults,
}

impl Normalizer {
    pub fn new(defaults: NormalizeDefaults) -> Self {
        let builtin = NormalizeDefaults::default();
        let title = non_blank(defaults.title).unwrap_or(builtin.title);
        let thumbnail = non_blank(defaults.thumbnail).unwrap_or(builtin.thumbnail);
        Self {
            defaults: NormalizeDefaults {
                title,
                excerpt: defaults.excerpt.trim().to_string(),
                thumbnail,
            },
        }
    }

    pub fn defaults(&self) -> &NormalizeDefaults {
        &self.defaults
    }

    /// Build the canonical article for one raw record.
    pub fn article(&self, raw: &Value) -> CanonicalArticle {
        let shape = RawShape::classify(raw);

        let title = shape.resolve(TITLE, non_empty_str);
        let raw_slug = shape.resolve(SLUG, non_empty_str);
        let id = shape
            .resolve(ID, ArticleId::from_value)
            .unwrap_or_else(|| derive_missing_id(raw, raw_slug.as_deref(), title.as_deref()));
        let slug = raw_slug.unwrap_or_else(|| format!("post-{id}"));

        let (category_name, category_slug) = shape
            .resolve(CATEGORY, |value| {
                let name = resolve_category_name(Some(value))?;
                let slug =
                    category_slug_of(value).unwrap_or_else(|| slug_or(&name, "uncategorized"));
                Some((name, slug))
            })
            .or_else(|| {
                let name = shape.resolve(CATEGORY_NAME, non_empty_str)?;
                let slug = shape
                    .resolve(CATEGORY_SLUG, non_empty_str)
                    .unwrap_or_else(|| slug_or(&name, "uncategorized"));
                Some((name, slug))
            })
            .unwrap_or_else(|| (DEFAULT_CATEGORY.to_string(), "uncategorized".to_string()));

        CanonicalArticle {
            id,
            title: title.unwrap_or_else(|| self.defaults.title.clone()),
            slug,
            excerpt: shape
                .resolve(EXCERPT, non_empty_str)
                .unwrap_or_else(|| self.defaults.excerpt.clone()),
            content: shape.resolve(CONTENT, non_empty_str),
            thumbnail_url: shape
                .resolve(THUMBNAIL, absolute_thumbnail)
                .unwrap_or_else(|| self.defaults.thumbnail.clone()),
            category_name,
            category_slug,
            author_name: shape
                .resolve(AUTHOR, |value| resolve_author_name(Some(value)))
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            read_time: shape
                .resolve(READ_TIME, read_time_of)
                .unwrap_or_else(|| DEFAULT_READ_TIME.to_string()),
            published_at: shape.resolve(PUBLISHED_AT, non_empty_str),
        }
    }

    /// Build the canonical category for one raw record, or `None` when no
    /// name can be found.
    pub fn category(&self, raw: &Value) -> Option<CanonicalCategory> {
        let name = resolve_category_name(Some(raw))?;
        let shape = RawShape::classify(raw);
        let id = shape.resolve(ID, ArticleId::from_value).or_else(|| {
            raw.get("data")
                .and_then(|data| data.get("id"))
                .and_then(ArticleId::from_value)
        });

        let slug = category_slug_of(raw).unwrap_or_else(|| {
            let fallback = id
                .as_ref()
                .map(|id| format!("category-{id}"))
                .unwrap_or_else(|| "uncategorized".to_string());
            slug_or(&name, &fallback)
        });
        let description = shape
            .resolve(DESCRIPTION, non_empty_str)
            .unwrap_or_else(|| format!("{name} related content"));

        Some(CanonicalCategory {
            id,
            name,
            slug,
            description,
        })
    }

    pub fn articles(&self, raw: &[Value]) -> Vec<CanonicalArticle> {
        raw.iter().map(|record| self.article(record)).collect()
    }

    /// Normalize a category list, dropping nameless entries and keeping order.
    pub fn categories(&self, raw: &[Value]) -> Vec<CanonicalCategory> {
        raw.iter()
            .filter_map(|record| self.category(record))
            .collect()
    }
}

/// Normalize an article with the built-in defaults.
pub fn normalize_article(raw: &Value) -> CanonicalArticle {
    Normalizer::default().article(raw)
}

/// Normalize a category with the built-in defaults. `None` means the record
/// has no display name and must be left out of category lists.
pub fn normalize_category(raw: &Value) -> Option<CanonicalCategory> {
    Normalizer::default().category(raw)
}

pub fn normalize_articles(raw: &[Value]) -> Vec<CanonicalArticle> {
    Normalizer::default().articles(raw)
}

pub fn normalize_categories(raw: &[Value]) -> Vec<CanonicalCategory> {
    Normalizer::default().categories(raw)
}

/// Resolve an image reference to a URL.
///
/// Accepts the CMS media shape (`data.attributes.url`), a bare string, or an
/// object with `url`. Only absolute (`http`-prefixed) URLs are kept; anything
/// else becomes [`PLACEHOLDER_THUMBNAIL`].
pub fn resolve_thumbnail(raw: Option<&Value>) -> String {
    raw.and_then(absolute_thumbnail)
        .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string())
}

fn absolute_thumbnail(value: &Value) -> Option<String> {
    let url = str_at(value, &["data", "attributes", "url"])
        .or_else(|| non_empty_str(value))
        .or_else(|| str_at(value, &["url"]))?;
    url.starts_with("http").then_some(url)
}

/// Resolve a category reference to its display name.
///
/// Accepts a string, the CMS shape (`data.attributes.name`), a singly nested
/// shape (`attributes.name`) or a flat `{ name }` object.
pub fn resolve_category_name(raw: Option<&Value>) -> Option<String> {
    named_reference(raw?)
}

/// Resolve an author reference to a name. Same shapes as categories.
pub fn resolve_author_name(raw: Option<&Value>) -> Option<String> {
    named_reference(raw?)
}

fn named_reference(value: &Value) -> Option<String> {
    non_empty_str(value)
        .or_else(|| str_at(value, &["data", "attributes", "name"]))
        .or_else(|| str_at(value, &["attributes", "name"]))
        .or_else(|| str_at(value, &["name"]))
}

fn category_slug_of(value: &Value) -> Option<String> {
    str_at(value, &["data", "attributes", "slug"])
        .or_else(|| str_at(value, &["attributes", "slug"]))
        .or_else(|| str_at(value, &["slug"]))
}

fn read_time_of(value: &Value) -> Option<String> {
    match value {
        Value::Number(minutes) => minutes.as_u64().map(|minutes| format!("{minutes} min")),
        _ => non_empty_str(value),
    }
}

fn derive_missing_id(raw: &Value, slug: Option<&str>, title: Option<&str>) -> ArticleId {
    let derived = slug
        .map(ToOwned::to_owned)
        .or_else(|| title.map(slugify).filter(|slug| !slug.is_empty()))
        .unwrap_or_else(|| format!("untitled-{}", record_digest(raw)));
    ArticleId::Text(derived)
}

/// First 12 hex chars of the SHA-256 of the record's JSON text.
fn record_digest(raw: &Value) -> String {
    let mut hex = format!("{:x}", Sha256::digest(raw.to_string().as_bytes()));
    hex.truncate(12);
    hex
}

fn slug_or(name: &str, fallback: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn cms_article_resolves_every_nested_field() {
        let raw = json!({
            "id": 1,
            "attributes": {
                "title": "Inside the Autonomy Flight Stack",
                "slug": "inside-the-autonomy-flight-stack",
                "excerpt": "Perception to planning.",
                "featuredImage": { "data": { "attributes": { "url": "https://cdn.example.com/a.png" } } },
                "category": { "data": { "id": 1, "attributes": { "name": "Autonomy", "slug": "autonomy" } } },
                "author": { "data": { "attributes": { "name": "Aarav Sharma" } } },
                "readTime": "12 min",
                "publishedAt": "2024-01-15T10:00:00.000Z"
            }
        });

        let article = normalize_article(&raw);
        assert_eq!(article.id, ArticleId::Number(1));
        assert_eq!(article.title, "Inside the Autonomy Flight Stack");
        assert_eq!(article.thumbnail_url, "https://cdn.example.com/a.png");
        assert_eq!(article.category_name, "Autonomy");
        assert_eq!(article.category_slug, "autonomy");
        assert_eq!(article.author_name, "Aarav Sharma");
        assert_eq!(article.read_time, "12 min");
        assert_eq!(article.published_at.as_deref(), Some("2024-01-15T10:00:00.000Z"));
    }

    #[test]
    fn empty_record_gets_every_default() {
        let article = normalize_article(&json!({ "id": 42 }));
        assert_eq!(article.title, DEFAULT_TITLE);
        assert_eq!(article.slug, "post-42");
        assert_eq!(article.excerpt, "");
        assert_eq!(article.thumbnail_url, PLACEHOLDER_THUMBNAIL);
        assert_eq!(article.category_name, DEFAULT_CATEGORY);
        assert_eq!(article.category_slug, "uncategorized");
        assert_eq!(article.author_name, DEFAULT_AUTHOR);
        assert_eq!(article.read_time, DEFAULT_READ_TIME);
        assert!(article.published_at.is_none());
        assert!(article.content.is_none());
    }

    #[test]
    fn non_object_record_still_normalizes() {
        let article = normalize_article(&json!("garbage"));
        let ArticleId::Text(id) = &article.id else {
            panic!("expected a derived text id, got {:?}", article.id);
        };
        assert!(id.starts_with("untitled-"));
        assert_eq!(id.len(), "untitled-".len() + 12);
        assert_eq!(article.slug, format!("post-{id}"));
        assert_eq!(article.title, DEFAULT_TITLE);
    }

    #[test]
    fn anonymous_records_get_distinct_ids() {
        let first = normalize_article(&json!({ "excerpt": "a" }));
        let second = normalize_article(&json!({ "excerpt": "b" }));
        assert_ne!(first.id, second.id);
        assert_ne!(first.slug, second.slug);
        assert_eq!(normalize_article(&json!({ "excerpt": "a" })).id, first.id);
    }

    #[test]
    fn canonical_category_fields_are_read_back() {
        let emitted = json!({
            "id": 7,
            "title": "Swarm Coordination",
            "thumbnailUrl": "https://cdn/swarm.png",
            "categoryName": "Autonomy",
            "categorySlug": "auto"
        });
        let article = normalize_article(&emitted);
        assert_eq!(article.thumbnail_url, "https://cdn/swarm.png");
        assert_eq!(article.category_name, "Autonomy");
        assert_eq!(article.category_slug, "auto");
    }

    #[test]
    fn missing_id_is_derived_from_title() {
        let article = normalize_article(&json!({ "title": "Battery Optimization" }));
        assert_eq!(article.id, ArticleId::Text("battery-optimization".to_string()));
        assert_eq!(article.slug, "post-battery-optimization");
    }

    #[test]
    fn published_at_falls_back_to_created_at() {
        let cms = json!({ "id": 1, "attributes": { "createdAt": "2024-02-01T00:00:00Z" } });
        let flat = json!({ "id": 2, "createdAt": "2024-03-01T00:00:00Z", "publishedAt": null });
        assert_eq!(normalize_article(&cms).published_at.as_deref(), Some("2024-02-01T00:00:00Z"));
        assert_eq!(normalize_article(&flat).published_at.as_deref(), Some("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn numeric_read_time_gets_minute_suffix() {
        let article = normalize_article(&json!({ "id": 3, "readTime": 8 }));
        assert_eq!(article.read_time, "8 min");
    }

    #[test]
    fn fractional_or_negative_read_time_takes_default() {
        for read_time in [json!(5.5), json!(-3)] {
            let article = normalize_article(&json!({ "id": 3, "readTime": read_time }));
            assert_eq!(article.read_time, DEFAULT_READ_TIME);
        }
    }

    #[test]
    fn resolve_thumbnail_only_keeps_absolute_urls() {
        let cms_relative = json!({ "data": { "attributes": { "url": "/uploads/a.png" } } });
        let cms_absolute = json!({ "data": { "attributes": { "url": "https://cdn/a.png" } } });
        let bare_relative = json!("images/a.png");
        let bare_absolute = json!("http://cdn/b.png");
        let object_url = json!({ "url": "https://cdn/c.png" });
        let object_relative = json!({ "url": "c.png" });

        assert_eq!(resolve_thumbnail(Some(&cms_relative)), PLACEHOLDER_THUMBNAIL);
        assert_eq!(resolve_thumbnail(Some(&cms_absolute)), "https://cdn/a.png");
        assert_eq!(resolve_thumbnail(Some(&bare_relative)), PLACEHOLDER_THUMBNAIL);
        assert_eq!(resolve_thumbnail(Some(&bare_absolute)), "http://cdn/b.png");
        assert_eq!(resolve_thumbnail(Some(&object_url)), "https://cdn/c.png");
        assert_eq!(resolve_thumbnail(Some(&object_relative)), PLACEHOLDER_THUMBNAIL);
        assert_eq!(resolve_thumbnail(Some(&json!(null))), PLACEHOLDER_THUMBNAIL);
        assert_eq!(resolve_thumbnail(Some(&json!(17))), PLACEHOLDER_THUMBNAIL);
        assert_eq!(resolve_thumbnail(None), PLACEHOLDER_THUMBNAIL);
    }

    #[test]
    fn resolve_thumbnail_falls_through_null_media_to_url() {
        let mixed = json!({ "data": null, "url": "https://cdn/d.png" });
        assert_eq!(resolve_thumbnail(Some(&mixed)), "https://cdn/d.png");
    }

    #[test]
    fn thumbnail_chain_moves_past_relative_featured_image() {
        let raw = json!({
            "id": 5,
            "attributes": {
                "featuredImage": { "data": { "attributes": { "url": "/uploads/x.png" } } },
                "thumbnail": "https://cdn/x.png"
            }
        });
        assert_eq!(normalize_article(&raw).thumbnail_url, "https://cdn/x.png");
    }

    #[test]
    fn resolve_category_name_accepts_all_known_shapes() {
        let cases = [
            json!("Sensors"),
            json!({ "data": { "attributes": { "name": "Sensors" } } }),
            json!({ "attributes": { "name": "Sensors" } }),
            json!({ "name": "Sensors" }),
        ];
        for case in &cases {
            assert_eq!(resolve_category_name(Some(case)).as_deref(), Some("Sensors"));
        }
        assert!(resolve_category_name(Some(&json!({ "data": null }))).is_none());
        assert!(resolve_category_name(Some(&json!(""))).is_none());
        assert!(resolve_category_name(None).is_none());
    }

    #[test]
    fn category_without_name_is_excluded() {
        assert!(normalize_category(&json!({ "id": 9, "attributes": { "slug": "x" } })).is_none());
        assert!(normalize_category(&json!({ "id": 9 })).is_none());
    }

    #[test]
    fn category_slug_and_description_defaults() {
        let category = normalize_category(&json!({ "id": 2, "attributes": { "name": "Power Systems" } }))
            .expect("named category");
        assert_eq!(category.id, Some(ArticleId::Number(2)));
        assert_eq!(category.slug, "power-systems");
        assert_eq!(category.description, "Power Systems related content");

        let symbolic = normalize_category(&json!({ "id": 4, "name": "!!!" })).expect("named");
        assert_eq!(symbolic.slug, "category-4");
    }

    #[test]
    fn category_keeps_explicit_slug_and_description() {
        let category = normalize_category(&json!({
            "id": 1,
            "attributes": {
                "name": "Autonomy",
                "slug": "auto",
                "description": "Autonomous systems"
            }
        }))
        .expect("named category");
        assert_eq!(category.slug, "auto");
        assert_eq!(category.description, "Autonomous systems");
    }

    #[test]
    fn configured_defaults_replace_builtins_but_never_blank() {
        let normalizer = Normalizer::new(NormalizeDefaults {
            title: "Untitled Post".to_string(),
            excerpt: "No description available.".to_string(),
            thumbnail: "   ".to_string(),
        });
        let article = normalizer.article(&json!({ "id": 1 }));
        assert_eq!(article.title, "Untitled Post");
        assert_eq!(article.excerpt, "No description available.");
        assert_eq!(article.thumbnail_url, PLACEHOLDER_THUMBNAIL);

        let blank = Normalizer::new(NormalizeDefaults {
            title: String::new(),
            ..NormalizeDefaults::default()
        });
        assert_eq!(blank.article(&json!({ "id": 1 })).title, DEFAULT_TITLE);
    }

    #[test]
    fn categories_drop_nameless_and_keep_order() {
        let raw = vec![
            json!({ "id": 2, "attributes": { "name": "Power Systems" } }),
            json!({ "id": 3, "attributes": {} }),
            json!({ "id": 1, "attributes": { "name": "Autonomy" } }),
        ];
        let names: Vec<_> = normalize_categories(&raw)
            .into_iter()
            .map(|category| category.name)
            .collect();
        assert_eq!(names, vec!["Power Systems".to_string(), "Autonomy".to_string()]);
    }
}
