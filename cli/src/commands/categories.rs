use std::path::Path;

use anyhow::Result;
use serde_json::Value;
use vyomgarud_shared::{filter::category_summaries, filter_categories_by_query, Normalizer};

use crate::utils::{print_json, read_raw_records};

pub fn run(
    file: &Path,
    query: Option<&str>,
    posts: Option<&Path>,
    normalizer: &Normalizer,
) -> Result<()> {
    let raw_categories = read_raw_records(file)?;
    let raw_posts = match posts {
        Some(path) => Some(read_raw_records(path)?),
        None => None,
    };
    print_json(&render(&raw_categories, raw_posts.as_deref(), query, normalizer)?)
}

/// Categories narrowed by `query`. With posts, each entry carries its post
/// count and categories only seen on posts are included.
pub fn render(
    raw_categories: &[Value],
    raw_posts: Option<&[Value]>,
    query: Option<&str>,
    normalizer: &Normalizer,
) -> Result<Value> {
    let categories = normalizer.categories(raw_categories);
    let keep = |name: &str| {
        !filter_categories_by_query(&[name], query.unwrap_or("")).is_empty()
    };

    match raw_posts {
        Some(raw_posts) => {
            let articles = normalizer.articles(raw_posts);
            let mut summaries = category_summaries(&articles, &categories);
            summaries.retain(|summary| keep(&summary.name));
            Ok(serde_json::to_value(summaries)?)
        },
        None => {
            let categories: Vec<_> = categories
                .into_iter()
                .filter(|category| keep(&category.name))
                .collect();
            Ok(serde_json::to_value(categories)?)
        },
    }
}
