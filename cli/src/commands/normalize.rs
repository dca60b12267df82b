use std::path::Path;

use anyhow::Result;
use serde_json::Value;
use vyomgarud_shared::Normalizer;

use crate::{
    cli::RecordKind,
    utils::{print_json, read_raw_records},
};

pub fn run(file: &Path, kind: RecordKind, normalizer: &Normalizer) -> Result<()> {
    let raw = read_raw_records(file)?;
    print_json(&render(&raw, kind, normalizer)?)
}

/// Canonical JSON for `raw`. Nameless categories are dropped.
pub fn render(raw: &[Value], kind: RecordKind, normalizer: &Normalizer) -> Result<Value> {
    match kind {
        RecordKind::Article => {
            let articles = normalizer.articles(raw);
            tracing::info!("Normalized {} articles", articles.len());
            Ok(serde_json::to_value(articles)?)
        },
        RecordKind::Category => {
            let categories = normalizer.categories(raw);
            let skipped = raw.len() - categories.len();
            if skipped > 0 {
                tracing::info!("Skipped {} categories without a name", skipped);
            }
            Ok(serde_json::to_value(categories)?)
        },
    }
}
