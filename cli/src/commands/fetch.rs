use std::time::Duration;

use anyhow::{Context, Result};
use vyomgarud_shared::{
    cms::CmsClient, filter::sort_newest_first, source::ArticleQuery, Normalizer,
};

use crate::{cli::FetchKind, utils::print_json};

pub async fn run(
    cms_url: &str,
    kind: FetchKind,
    category: Option<String>,
    slug: Option<String>,
    timeout_secs: u64,
    normalizer: &Normalizer,
) -> Result<()> {
    let client = CmsClient::new(cms_url, Duration::from_secs(timeout_secs))
        .with_context(|| format!("cannot use CMS url `{cms_url}`"))?;
    tracing::info!("Fetching {:?} from {}", kind, client.base_url());

    match kind {
        FetchKind::Articles => {
            let query = ArticleQuery {
                category,
                slug,
            };
            let raw = client
                .fetch_articles(&query)
                .await
                .context("failed to fetch articles")?;
            let mut articles = normalizer.articles(&raw);
            sort_newest_first(&mut articles);
            tracing::info!("Fetched {} articles", articles.len());
            print_json(&articles)
        },
        FetchKind::Categories => {
            if category.is_some() || slug.is_some() {
                tracing::warn!("--category and --slug only apply to articles; ignoring");
            }
            let raw = client
                .fetch_categories()
                .await
                .context("failed to fetch categories")?;
            let categories = normalizer.categories(&raw);
            tracing::info!("Fetched {} categories", categories.len());
            print_json(&categories)
        },
    }
}
