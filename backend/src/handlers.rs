use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vyomgarud_shared::{
    filter::{find_article_by_slug, search_articles, sort_newest_first},
    filter_articles, filter_categories_by_query,
    slug::title_from_slug,
    source::ArticleQuery,
    view::{build_blog_view, BlogView, RenderMode},
    CanonicalArticle, CanonicalCategory, ContentOutcome,
};

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PostsQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TextQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub view: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<CanonicalArticle>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryPostsResponse {
    pub category: String,
    pub slug: String,
    pub articles: Vec<CanonicalArticle>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CanonicalCategory>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<CanonicalArticle>,
    pub total: usize,
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> Result<Json<ArticleListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let category = non_blank(query.category.as_deref());
    let source_query = ArticleQuery {
        category: category.map(ToOwned::to_owned),
        slug: None,
    };
    let outcome = state.source().articles(&source_query).await;
    let records = records_or_bad_gateway(outcome, "Failed to fetch posts")?;
    let articles = state.normalizer().articles(&records);

    let mut articles = match (category, non_blank(query.q.as_deref())) {
        (Some(category), text) => filter_articles(&articles, category, text),
        (None, Some(text)) => search_articles(&articles, text),
        (None, None) => articles,
    };
    sort_newest_first(&mut articles);

    Ok(Json(ArticleListResponse {
        total: articles.len(),
        articles,
    }))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CanonicalArticle>, (StatusCode, Json<ErrorResponse>)> {
    let outcome = state.source().articles(&ArticleQuery::by_slug(&slug)).await;
    let records = records_or_bad_gateway(outcome, "Failed to fetch post")?;
    let articles = state.normalizer().articles(&records);

    match find_article_by_slug(&articles, &slug) {
        Some(article) => Ok(Json(article.clone())),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Post not found".to_string(),
                code: 404,
            }),
        )),
    }
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Result<Json<CategoriesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let outcome = state.source().categories().await;
    let records = records_or_bad_gateway(outcome, "Failed to fetch categories")?;
    let mut categories = state.normalizer().categories(&records);

    let names: Vec<&str> = categories
        .iter()
        .map(|category| category.name.as_str())
        .collect();
    let wanted: HashSet<String> =
        filter_categories_by_query(&names, query.q.as_deref().unwrap_or(""))
            .into_iter()
            .collect();
    categories.retain(|category| wanted.contains(&category.name));

    Ok(Json(CategoriesResponse {
        total: categories.len(),
        categories,
    }))
}

pub async fn category_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<TextQuery>,
) -> Result<Json<CategoryPostsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let category = title_from_slug(&slug);
    let outcome = state
        .source()
        .articles(&ArticleQuery::by_category(category.as_str()))
        .await;
    let records = records_or_bad_gateway(outcome, "Failed to fetch category posts")?;
    let articles = state.normalizer().articles(&records);

    let mut articles = filter_articles(&articles, &category, non_blank(query.q.as_deref()));
    sort_newest_first(&mut articles);

    Ok(Json(CategoryPostsResponse {
        category,
        slug,
        total: articles.len(),
        articles,
    }))
}

pub async fn search_posts(
    State(state): State<AppState>,
    Query(query): Query<TextQuery>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let raw_query = query.q.unwrap_or_default();
    let Some(keyword) = non_blank(Some(raw_query.as_str())) else {
        return Ok(Json(SearchResponse {
            results: vec![],
            total: 0,
            query: raw_query,
        }));
    };

    let outcome = state.source().articles(&ArticleQuery::default()).await;
    let records = records_or_bad_gateway(outcome, "Failed to search posts")?;
    let articles = state.normalizer().articles(&records);

    let mut results = search_articles(&articles, keyword);
    sort_newest_first(&mut results);

    Ok(Json(SearchResponse {
        total: results.len(),
        results,
        query: raw_query,
    }))
}

/// The blog page. Source failures show up as the view's empty state rather
/// than an error status.
pub async fn blog_view(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Result<Json<BlogView>, (StatusCode, Json<ErrorResponse>)> {
    let mode = match non_blank(query.view.as_deref()) {
        Some(view) => view.parse::<RenderMode>().map_err(|err| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err,
                    code: 400,
                }),
            )
        })?,
        None => state.render_mode(),
    };

    let all_posts = ArticleQuery::default();
    let (posts, categories) =
        tokio::join!(state.source().articles(&all_posts), state.source().categories());

    Ok(Json(build_blog_view(
        &posts,
        &categories,
        query.q.as_deref(),
        mode,
        state.normalizer(),
    )))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// An empty listing is fine; only a failed fetch becomes an error.
fn records_or_bad_gateway(
    outcome: ContentOutcome,
    message: &str,
) -> Result<Vec<Value>, (StatusCode, Json<ErrorResponse>)> {
    if let Some(reason) = outcome.empty_reason().filter(|reason| reason.is_failure()) {
        return Err(bad_gateway(message, reason));
    }
    Ok(outcome.into_records())
}

fn bad_gateway(message: &str, err: impl std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!("{}: {}", message, err);
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: message.to_string(),
            code: 502,
        }),
    )
}
