use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vyomgarud_shared::cms::DEFAULT_CMS_BASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Article,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchKind {
    Articles,
    Categories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Normal,
    Debug,
}

#[derive(Parser)]
#[command(name = "vg-cli", version, about = "VyomGarud content normalization CLI")]
pub struct Cli {
    #[command(flatten)]
    pub placeholders: PlaceholderArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the normalizer's fallback values.
#[derive(Debug, Default, Args)]
pub struct PlaceholderArgs {
    /// Title used when a record has none.
    #[arg(long, global = true)]
    pub title_placeholder: Option<String>,
    /// Excerpt used when a record has none (defaults to empty).
    #[arg(long, global = true)]
    pub excerpt_placeholder: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize raw records from a JSON file and print canonical JSON.
    Normalize {
        /// JSON array or `{ "data": [...] }` envelope.
        #[arg(long)]
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = RecordKind::Article)]
        kind: RecordKind,
    },
    /// Print the articles of one category, optionally narrowed by a query.
    Filter {
        #[arg(long)]
        file: PathBuf,
        /// Category display name (case-insensitive).
        #[arg(long)]
        category: String,
        #[arg(long)]
        query: Option<String>,
    },
    /// Print normalized categories, optionally narrowed by a query.
    Categories {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        query: Option<String>,
        /// Article file; when given, print per-category post counts instead.
        #[arg(long)]
        posts: Option<PathBuf>,
    },
    /// Build the blog page model from post and category files.
    Browse {
        #[arg(long)]
        posts: PathBuf,
        #[arg(long)]
        categories: Option<PathBuf>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long, value_enum, default_value_t = ViewArg::Normal)]
        view: ViewArg,
    },
    /// Fetch records from the CMS and print them normalized.
    Fetch {
        #[arg(long, default_value = DEFAULT_CMS_BASE_URL)]
        cms_url: String,
        #[arg(long, value_enum, default_value_t = FetchKind::Articles)]
        kind: FetchKind,
        /// Only articles in this category (case-insensitive).
        #[arg(long)]
        category: Option<String>,
        /// Only the article with this slug.
        #[arg(long)]
        slug: Option<String>,
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
    /// Print the URL slug for a display name.
    Slugify {
        text: String,
    },
}
