use axum::{
    extract::{rejection::QueryRejection, Extension, Query, State},
    http::Method,
    Json,
};
use serde::Serialize;

use crate::config;
use crate::database::models::PostSummary;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::search::{PostFilter, SearchError, SearchParams};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub posts: Vec<PostSummary>,
    pub total: i64,
    pub total_pages: i64,
}

/// GET /api/posts/my-search - search the caller's own posts
///
/// Query parameters:
/// - query: required substring, matched case-insensitively
/// - sortByTitle | sortByTags | sortByContent | sortByTemplates: the first
///   one equal to "true" selects what `query` is matched against
/// - page / limit: 1-based pagination, defaults 1 and 10
pub async fn my_search(
    method: Method,
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    if method != Method::GET {
        return Err(ApiError::method_not_allowed());
    }

    let Query(params) = query.map_err(|e| SearchError::MalformedQuery(e.body_text()))?;
    let request = params.validate(&config::config().search)?;
    let filter = PostFilter::new(auth_user.user_id, request);

    tracing::debug!(
        user_id = filter.author_id,
        criteria = %filter.criteria,
        page = filter.pagination.page,
        limit = filter.pagination.limit,
        "Searching posts"
    );

    let (posts, total) = tokio::try_join!(
        state.store.find_posts(&filter),
        state.store.count_posts(&filter)
    )?;

    Ok(Json(SearchResponse {
        posts,
        total,
        total_pages: filter.pagination.total_pages(total),
    }))
}
