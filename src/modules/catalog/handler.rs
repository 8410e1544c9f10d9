use super::dto::{CategorySection, HomePage, MovieDetail, SearchQuery, SearchResults};
use super::service::CatalogService;
use crate::common::flash;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tower_cookies::Cookies;

/// Home page: spotlight, new releases, trending and category rails
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page", body = ApiResponse<HomePage>)
    ),
    tag = "Catalog"
)]
pub async fn home(State(state): State<AppState>, cookies: Cookies) -> impl IntoResponse {
    match CatalogService::home(&state).await {
        Ok(page) => ApiSuccess(
            ApiResponse::success(page, "Home").with_flash(flash::take(&cookies)),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Titles grouped by category tag
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Category sections", body = ApiResponse<Vec<CategorySection>>)
    ),
    tag = "Catalog"
)]
pub async fn categories(State(state): State<AppState>) -> impl IntoResponse {
    match CatalogService::categories(&state).await {
        Ok(sections) => ApiSuccess(ApiResponse::success(sections, "Categories"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Detail page of a single title
#[utoipa::path(
    get,
    path = "/movie/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Title detail", body = ApiResponse<MovieDetail>),
        (status = 404, description = "Title not found")
    ),
    tag = "Catalog"
)]
pub async fn movie_detail(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match CatalogService::detail(&state, id).await {
        Ok(detail) => ApiSuccess(
            ApiResponse::success(detail, "Title retrieved").with_flash(flash::take(&cookies)),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Search titles
#[utoipa::path(
    get,
    path = "/search",
    params(
        ("q" = Option<String>, Query, description = "Part of a title, case-insensitive")
    ),
    responses(
        (status = 200, description = "Matching titles", body = ApiResponse<SearchResults>)
    ),
    tag = "Catalog"
)]
pub async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> impl IntoResponse {
    match CatalogService::search(&state, &query.q).await {
        Ok(results) => ApiSuccess(ApiResponse::success(results, "Search results"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
