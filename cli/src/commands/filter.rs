use std::path::Path;

use anyhow::Result;
use vyomgarud_shared::{filter_articles, Normalizer};

use crate::utils::{print_json, read_raw_records};

pub fn run(file: &Path, category: &str, query: Option<&str>, normalizer: &Normalizer) -> Result<()> {
    let articles = normalizer.articles(&read_raw_records(file)?);
    let matched = filter_articles(&articles, category, query);
    tracing::info!("{} of {} articles match category `{}`", matched.len(), articles.len(), category);
    print_json(&matched)
}
