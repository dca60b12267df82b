use std::path::Path;

use anyhow::Result;
use vyomgarud_shared::{
    view::{build_blog_view, BlogView, RenderMode},
    ContentOutcome, Normalizer,
};

use crate::{
    cli::ViewArg,
    utils::{print_json, read_optional_records, read_raw_records},
};

impl From<ViewArg> for RenderMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Normal => RenderMode::Normal,
            ViewArg::Debug => RenderMode::Debug,
        }
    }
}

pub fn run(
    posts: &Path,
    categories: Option<&Path>,
    query: Option<&str>,
    view: ViewArg,
    normalizer: &Normalizer,
) -> Result<()> {
    let posts = ContentOutcome::from_records(read_raw_records(posts)?);
    let categories = ContentOutcome::from_records(read_optional_records(categories)?);
    print_json(&render(&posts, &categories, query, view, normalizer))
}

pub fn render(
    posts: &ContentOutcome,
    categories: &ContentOutcome,
    query: Option<&str>,
    view: ViewArg,
    normalizer: &Normalizer,
) -> BlogView {
    let view = build_blog_view(posts, categories, query, view.into(), normalizer);
    tracing::info!(
        "Built {} view with {} sections from {} posts",
        view.mode,
        view.sections.len(),
        view.total_articles
    );
    view
}
