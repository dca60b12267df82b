pub mod browse;
pub mod categories;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod slugify;

use anyhow::Result;
use vyomgarud_shared::{NormalizeDefaults, Normalizer};

use crate::cli::{Cli, Commands, PlaceholderArgs};

pub async fn run(cli: Cli) -> Result<()> {
    let normalizer = build_normalizer(&cli.placeholders);
    match cli.command {
        Commands::Normalize {
            file,
            kind,
        } => normalize::run(&file, kind, &normalizer),
        Commands::Filter {
            file,
            category,
            query,
        } => filter::run(&file, &category, query.as_deref(), &normalizer),
        Commands::Categories {
            file,
            query,
            posts,
        } => categories::run(&file, query.as_deref(), posts.as_deref(), &normalizer),
        Commands::Browse {
            posts,
            categories,
            query,
            view,
        } => browse::run(&posts, categories.as_deref(), query.as_deref(), view, &normalizer),
        Commands::Fetch {
            cms_url,
            kind,
            category,
            slug,
            timeout_secs,
        } => fetch::run(&cms_url, kind, category, slug, timeout_secs, &normalizer).await,
        Commands::Slugify {
            text,
        } => slugify::run(&text),
    }
}

pub fn build_normalizer(placeholders: &PlaceholderArgs) -> Normalizer {
    let mut defaults = NormalizeDefaults::default();
    if let Some(title) = &placeholders.title_placeholder {
        defaults.title = title.clone();
    }
    if let Some(excerpt) = &placeholders.excerpt_placeholder {
        defaults.excerpt = excerpt.clone();
    }
    Normalizer::new(defaults)
}
