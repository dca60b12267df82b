use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, request_trace, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/posts/categories", get(handlers::list_categories))
        .route("/api/posts/:slug", get(handlers::get_post))
        .route("/api/categories/:slug/posts", get(handlers::category_posts))
        .route("/api/search", get(handlers::search_posts))
        .route("/api/blog", get(handlers::blog_view))
        .with_state(state)
        .layer(middleware::from_fn(request_trace::request_trace_middleware))
        .layer(cors)
}
