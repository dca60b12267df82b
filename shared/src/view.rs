//! Blog page model: category sections for the normal view, plus a per-record
//! breakdown when the caller asks for the debug view.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    filter::{category_names_from_articles, filter_articles, filter_categories_by_query},
    normalize::Normalizer,
    raw::RawShape,
    raw::ShapeKind,
    slug::slugify,
    source::ContentOutcome,
    ArticleId, CanonicalArticle,
};

/// How the blog page should be presented. Chosen by the caller per request
/// or by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Normal,
    Debug,
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(RenderMode::Normal),
            "debug" => Ok(RenderMode::Debug),
            other => Err(format!("unknown render mode `{other}` (expected normal or debug)")),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Normal => f.write_str("normal"),
            RenderMode::Debug => f.write_str("debug"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySection {
    pub name: String,
    pub slug: String,
    pub total: usize,
    pub articles: Vec<CanonicalArticle>,
    /// Set when the section has no articles to show.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// One raw post as the normalizer saw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugEntry {
    pub id: ArticleId,
    pub shape: ShapeKind,
    pub has_attributes: bool,
    pub title: String,
    pub category_name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    pub mode: RenderMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub total_articles: usize,
    pub total_categories: usize,
    pub sections: Vec<CategorySection>,
    /// Message to show instead of sections when there is nothing at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Vec<DebugEntry>>,
}

/// Assemble the blog page from raw fetch outcomes.
///
/// Category names come from the category list; when that is empty they are
/// derived from the posts. The query narrows both the category names and the
/// posts inside each section.
pub fn build_blog_view(
    posts: &ContentOutcome,
    categories: &ContentOutcome,
    query: Option<&str>,
    mode: RenderMode,
    normalizer: &Normalizer,
) -> BlogView {
    let query = query
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(ToOwned::to_owned);
    let articles = normalizer.articles(posts.records());

    // (display name, slug) pairs; explicit category slugs are kept as-is.
    let mut listed: Vec<(String, String)> = normalizer
        .categories(categories.records())
        .into_iter()
        .map(|category| (category.name, category.slug))
        .collect();
    if listed.is_empty() {
        listed = category_names_from_articles(&articles)
            .into_iter()
            .map(|name| {
                let slug = articles
                    .iter()
                    .find(|article| article.category_name == name)
                    .map(|article| article.category_slug.clone())
                    .unwrap_or_else(|| slugify(&name));
                (name, slug)
            })
            .collect();
    }
    let total_categories = listed.len();
    let needle = query.as_deref().unwrap_or("");
    listed.retain(|(name, _)| !filter_categories_by_query(&[name.as_str()], needle).is_empty());

    let sections = listed
        .into_iter()
        .map(|(name, slug)| {
            let matched = filter_articles(&articles, &name, query.as_deref());
            let empty_message = matched.is_empty().then(|| match query.as_deref() {
                Some(query) => format!("No posts found matching \"{query}\"."),
                None => "No posts found in this category.".to_string(),
            });
            CategorySection {
                slug,
                total: matched.len(),
                articles: matched,
                empty_message,
                name,
            }
        })
        .collect::<Vec<_>>();

    let empty_state = match posts.empty_reason() {
        Some(reason) if reason.is_failure() => {
            tracing::warn!(%reason, "blog view rendered without posts");
            Some("Posts are unavailable right now. Please check back soon.".to_string())
        },
        Some(_) => Some("No posts have been published yet.".to_string()),
        None if sections.is_empty() => Some(match query.as_deref() {
            Some(query) => format!("No categories match \"{query}\"."),
            None => "No categories available.".to_string(),
        }),
        None => None,
    };

    let debug = (mode == RenderMode::Debug).then(|| debug_entries(posts.records(), normalizer));

    BlogView {
        mode,
        query,
        total_articles: articles.len(),
        total_categories,
        sections,
        empty_state,
        debug,
    }
}

fn debug_entries(raw_posts: &[Value], normalizer: &Normalizer) -> Vec<DebugEntry> {
    raw_posts
        .iter()
        .map(|raw| {
            let shape = RawShape::classify(raw).kind();
            let article = normalizer.article(raw);
            tracing::debug!(
                id = %article.id,
                shape = ?shape,
                category = %article.category_name,
                "debug view entry"
            );
            DebugEntry {
                id: article.id,
                shape,
                has_attributes: shape == ShapeKind::Cms,
                title: article.title,
                category_name: article.category_name,
                slug: article.slug,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        fixtures,
        source::{ContentOutcome, EmptyReason},
    };

    fn fixture_outcomes() -> (ContentOutcome, ContentOutcome) {
        (
            ContentOutcome::from_records(fixtures::sample_articles()),
            ContentOutcome::from_records(fixtures::sample_categories()),
        )
    }

    #[test]
    fn render_mode_parses_case_insensitively() {
        assert_eq!("DEBUG".parse::<RenderMode>(), Ok(RenderMode::Debug));
        assert_eq!(" normal ".parse::<RenderMode>(), Ok(RenderMode::Normal));
        assert!("fancy".parse::<RenderMode>().is_err());
        assert_eq!(RenderMode::default(), RenderMode::Normal);
    }

    #[test]
    fn normal_view_has_one_section_per_category() {
        let (posts, categories) = fixture_outcomes();
        let view =
            build_blog_view(&posts, &categories, None, RenderMode::Normal, &Normalizer::default());

        let names: Vec<_> = view.sections.iter().map(|section| section.name.as_str()).collect();
        assert_eq!(names, vec!["Autonomy", "Power Systems", "Sensors"]);
        assert!(view.sections.iter().all(|section| section.total == 1));
        assert_eq!(view.sections[1].slug, "power-systems");
        assert!(view.debug.is_none());
        assert!(view.empty_state.is_none());
    }

    #[test]
    fn query_narrows_category_names() {
        let (posts, categories) = fixture_outcomes();
        let view = build_blog_view(
            &posts,
            &categories,
            Some("power"),
            RenderMode::Normal,
            &Normalizer::default(),
        );
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.total_categories, 3);
        assert_eq!(view.sections[0].name, "Power Systems");
        // The battery article mentions "power draw" in its excerpt.
        assert_eq!(view.sections[0].total, 1);
    }

    #[test]
    fn sections_keep_explicit_category_slugs() {
        let posts = ContentOutcome::from_records(vec![
            json!({ "id": 1, "title": "A", "category": { "name": "Autonomy", "slug": "auto" } }),
            json!({ "id": 2, "title": "B", "category": { "name": "Sensors", "slug": "eo-ir" } }),
        ]);
        let categories = ContentOutcome::from_records(vec![json!({
            "id": 1,
            "attributes": { "name": "Autonomy", "slug": "auto" }
        })]);
        let view =
            build_blog_view(&posts, &categories, None, RenderMode::Normal, &Normalizer::default());
        assert_eq!(view.sections[0].slug, "auto");

        let derived = build_blog_view(
            &posts,
            &ContentOutcome::Empty(EmptyReason::NoRecords),
            None,
            RenderMode::Normal,
            &Normalizer::default(),
        );
        let slugs: Vec<_> = derived.sections.iter().map(|section| section.slug.as_str()).collect();
        assert_eq!(slugs, vec!["auto", "eo-ir"]);
    }

    #[test]
    fn categories_fall_back_to_article_categories() {
        let posts = ContentOutcome::from_records(vec![
            json!({ "id": 1, "title": "A", "category": "Payloads" }),
            json!({ "id": 2, "title": "B" }),
        ]);
        let categories = ContentOutcome::Empty(EmptyReason::Status(500));
        let view =
            build_blog_view(&posts, &categories, None, RenderMode::Normal, &Normalizer::default());
        let names: Vec<_> = view.sections.iter().map(|section| section.name.as_str()).collect();
        assert_eq!(names, vec!["Payloads", "Uncategorized"]);
    }

    #[test]
    fn failed_posts_show_empty_state() {
        let posts = ContentOutcome::Empty(EmptyReason::Unreachable("refused".to_string()));
        let (_, categories) = fixture_outcomes();
        let view =
            build_blog_view(&posts, &categories, None, RenderMode::Normal, &Normalizer::default());
        assert_eq!(view.total_articles, 0);
        assert!(view.empty_state.is_some());
        for section in &view.sections {
            assert_eq!(section.empty_message.as_deref(), Some("No posts found in this category."));
        }
    }

    #[test]
    fn debug_view_lists_every_raw_post() {
        let posts = ContentOutcome::from_records(vec![
            fixtures::sample_articles().remove(0),
            json!({ "id": "flat-1", "title": "Battery Optimization" }),
        ]);
        let categories = ContentOutcome::Empty(EmptyReason::NoRecords);
        let view =
            build_blog_view(&posts, &categories, None, RenderMode::Debug, &Normalizer::default());

        let debug = view.debug.expect("debug entries");
        assert_eq!(debug.len(), 2);
        assert_eq!(debug[0].shape, ShapeKind::Cms);
        assert!(debug[0].has_attributes);
        assert_eq!(debug[1].shape, ShapeKind::Flat);
        assert_eq!(debug[1].category_name, "Uncategorized");
    }
}
