//! Collection Filter: category and free-text selection over canonical articles.
//!
//! All functions borrow their input and return new collections in input order.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};

use crate::{slug::slugify, CanonicalArticle, CanonicalCategory, CategoryInfo};

/// Articles whose category equals `category_name` (case-insensitive) and,
/// when `query` is non-blank, whose title or excerpt contains it.
pub fn filter_articles(
    articles: &[CanonicalArticle],
    category_name: &str,
    query: Option<&str>,
) -> Vec<CanonicalArticle> {
    let category = category_name.to_lowercase();
    let needle = normalized_query(query);

    articles
        .iter()
        .filter(|article| article.category_name.to_lowercase() == category)
        .filter(|article| needle.as_deref().map_or(true, |needle| text_matches(article, needle)))
        .cloned()
        .collect()
}

/// Category names containing `query` (case-insensitive). A blank query
/// returns every name; blank names never match a real query.
pub fn filter_categories_by_query<S: AsRef<str>>(
    category_names: &[S],
    query: &str,
) -> Vec<String> {
    let Some(needle) = normalized_query(Some(query)) else {
        return category_names
            .iter()
            .map(|name| name.as_ref().to_string())
            .collect();
    };

    category_names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !name.trim().is_empty() && name.to_lowercase().contains(&needle))
        .map(ToOwned::to_owned)
        .collect()
}

/// Text search across all categories. A blank query matches nothing.
pub fn search_articles(articles: &[CanonicalArticle], query: &str) -> Vec<CanonicalArticle> {
    let Some(needle) = normalized_query(Some(query)) else {
        return Vec::new();
    };
    articles
        .iter()
        .filter(|article| text_matches(article, &needle))
        .cloned()
        .collect()
}

/// Distinct category names in first-seen order, compared case-insensitively.
pub fn category_names_from_articles(articles: &[CanonicalArticle]) -> Vec<String> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .filter(|article| seen.insert(article.category_name.to_lowercase()))
        .map(|article| article.category_name.clone())
        .collect()
}

pub fn find_article_by_slug<'a>(
    articles: &'a [CanonicalArticle],
    slug: &str,
) -> Option<&'a CanonicalArticle> {
    let slug = slug.trim();
    articles.iter().find(|article| article.slug == slug)
}

/// Newest first by `published_at`; undated or unparseable records keep their
/// relative order at the end.
pub fn sort_newest_first(articles: &mut [CanonicalArticle]) {
    articles.sort_by_cached_key(|article| {
        std::cmp::Reverse(article.published_at.as_deref().and_then(parse_timestamp))
    });
}

/// Per-category counts. Known categories keep their description; categories
/// only seen on articles get the generated one. Sorted by name.
pub fn category_summaries(
    articles: &[CanonicalArticle],
    categories: &[CanonicalCategory],
) -> Vec<CategoryInfo> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for article in articles {
        *counts.entry(article.category_name.to_lowercase()).or_insert(0) += 1;
    }

    let mut summaries: Vec<CategoryInfo> = categories
        .iter()
        .map(|category| CategoryInfo {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            count: counts.remove(&category.name.to_lowercase()).unwrap_or(0),
        })
        .collect();

    for name in category_names_from_articles(articles) {
        if let Some(count) = counts.remove(&name.to_lowercase()) {
            summaries.push(CategoryInfo {
                slug: slugify(&name),
                description: format!("{name} related content"),
                name,
                count,
            });
        }
    }

    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    summaries
}

fn normalized_query(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_lowercase)
}

fn text_matches(article: &CanonicalArticle, needle: &str) -> bool {
    article.title.to_lowercase().contains(needle) || article.excerpt.to_lowercase().contains(needle)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArticleId;

    fn article(id: i64, title: &str, excerpt: &str, category: &str) -> CanonicalArticle {
        CanonicalArticle {
            id: ArticleId::Number(id),
            title: title.to_string(),
            slug: format!("post-{id}"),
            excerpt: excerpt.to_string(),
            content: None,
            thumbnail_url: "/placeholder-post.png".to_string(),
            category_name: category.to_string(),
            category_slug: slugify(category),
            author_name: "Unknown Author".to_string(),
            read_time: "5 min".to_string(),
            published_at: None,
        }
    }

    fn sample() -> Vec<CanonicalArticle> {
        vec![
            article(1, "Flight Stack", "Perception and planning", "Autonomy"),
            article(2, "Battery Optimization", "Discharge curves", "Power Systems"),
            article(3, "Swarm Battery Sharing", "Hot-swapping packs", "autonomy"),
            article(4, "Waypoint Logic", "Mission planning for BATTERY limits", "AUTONOMY"),
        ]
    }

    fn ids(articles: &[CanonicalArticle]) -> Vec<String> {
        articles.iter().map(|article| article.id.to_string()).collect()
    }

    #[test]
    fn filter_articles_matches_category_case_insensitively_in_order() {
        let list = sample();
        assert_eq!(ids(&filter_articles(&list, "Autonomy", None)), vec!["1", "3", "4"]);
        assert!(filter_articles(&list, "Auto", None).is_empty());
    }

    #[test]
    fn filter_articles_intersects_category_and_query() {
        let list = sample();
        assert_eq!(ids(&filter_articles(&list, "Autonomy", Some("battery"))), vec!["3", "4"]);
        assert_eq!(ids(&filter_articles(&list, "Power Systems", Some("BATTERY"))), vec!["2"]);
    }

    #[test]
    fn blank_query_is_a_pass_through() {
        let list = sample();
        assert_eq!(
            filter_articles(&list, "autonomy", Some("   ")),
            filter_articles(&list, "autonomy", None)
        );
    }

    #[test]
    fn filter_articles_leaves_input_untouched() {
        let list = sample();
        let before = list.clone();
        let _ = filter_articles(&list, "Autonomy", Some("flight"));
        assert_eq!(list, before);
    }

    #[test]
    fn filter_categories_by_query_uses_substring_rule() {
        let names = vec!["Autonomy", "Power Systems", "Sensors", " "];
        assert_eq!(filter_categories_by_query(&names, "SYS"), vec!["Power Systems".to_string()]);
        assert_eq!(filter_categories_by_query(&names, "s"), vec![
            "Power Systems".to_string(),
            "Sensors".to_string()
        ]);
        assert_eq!(filter_categories_by_query(&names, "").len(), 4);
    }

    #[test]
    fn search_articles_spans_categories() {
        let list = sample();
        assert_eq!(ids(&search_articles(&list, "battery")), vec!["2", "3", "4"]);
        assert!(search_articles(&list, "  ").is_empty());
    }

    #[test]
    fn category_names_are_distinct_in_first_seen_order() {
        assert_eq!(category_names_from_articles(&sample()), vec![
            "Autonomy".to_string(),
            "Power Systems".to_string()
        ]);
    }

    #[test]
    fn find_article_by_slug_trims_input() {
        let list = sample();
        let found = find_article_by_slug(&list, " post-2 ").map(|a| a.id.to_string());
        assert_eq!(found.as_deref(), Some("2"));
        assert!(find_article_by_slug(&list, "post-9").is_none());
    }

    #[test]
    fn sort_newest_first_puts_undated_last() {
        let mut list = sample();
        list[0].published_at = Some("2024-01-08T09:30:00.000Z".to_string());
        list[1].published_at = Some("2024-01-15T10:00:00.000Z".to_string());
        list[3].published_at = Some("2024-01-10".to_string());
        sort_newest_first(&mut list);
        assert_eq!(ids(&list), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn category_summaries_count_known_and_derived_categories() {
        let categories = vec![CanonicalCategory {
            id: Some(ArticleId::Number(1)),
            name: "Autonomy".to_string(),
            slug: "autonomy".to_string(),
            description: "Autonomous systems".to_string(),
        }];
        let summaries = category_summaries(&sample(), &categories);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Autonomy");
        assert_eq!(summaries[0].count, 3);
        assert_eq!(summaries[1].name, "Power Systems");
        assert_eq!(summaries[1].slug, "power-systems");
        assert_eq!(summaries[1].description, "Power Systems related content");
        assert_eq!(summaries[1].count, 1);
    }
}
