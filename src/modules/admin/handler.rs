use super::dto::{EpisodeForm, EpisodeFormPage, EpisodeListQuery, EpisodeManager, MovieForm};
use super::service::{AdminService, SeriesLookup};
use crate::common::error::AppError;
use crate::common::flash;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::modules::catalog::dto::MovieCard;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use tower_cookies::Cookies;

const DASHBOARD: &str = "/admin/";
const FILM_EPISODE_EDIT: &str = "This title is a film; its episodes cannot be edited.";

fn episodes_url(movie_id: i64) -> String {
    format!("/admin/movies/{}/episodes", movie_id)
}

fn edit_url(movie_id: i64) -> String {
    format!("/admin/movies/{}/edit", movie_id)
}

fn page<T: Serialize>(data: T, message: &str, cookies: &Cookies) -> Response {
    ApiSuccess(
        ApiResponse::success(data, message).with_flash(flash::take(cookies)),
        StatusCode::OK,
    )
    .into_response()
}

/// Validation failures re-send the submitted values; everything else maps
/// through `AppError`.
fn reject<T: Serialize>(err: AppError, echo: T) -> Response {
    match err {
        AppError::Validation(message) => ApiSuccess(
            ApiResponse::rejected(echo, &message),
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .into_response(),
        other => other.into_response(),
    }
}

// --- MOVIE HANDLERS ---

/// Admin dashboard listing every title
#[utoipa::path(
    get,
    path = "/admin/",
    responses(
        (status = 200, description = "All titles, newest first", body = ApiResponse<Vec<MovieCard>>),
        (status = 303, description = "Not signed in as an administrator")
    ),
    tag = "Admin"
)]
pub async fn dashboard(State(state): State<AppState>, cookies: Cookies) -> Response {
    match AdminService::dashboard(&state).await {
        Ok(movies) => page(movies, "Dashboard", &cookies),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/admin/movies/new",
    responses((status = 200, description = "Empty title form", body = ApiResponse<MovieForm>)),
    tag = "Admin"
)]
pub async fn new_movie_page(cookies: Cookies) -> Response {
    page(MovieForm::default(), "New title", &cookies)
}

/// Create a film or a series
#[utoipa::path(
    post,
    path = "/admin/movies/new",
    request_body(content = MovieForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; series continue to their episode manager"),
        (status = 422, description = "Rejected form", body = ApiResponse<MovieForm>)
    ),
    tag = "Admin"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<MovieForm>,
) -> Response {
    let echo = form.clone().normalized();
    match AdminService::create_movie(&state, form).await {
        Ok(row) if row.is_series => {
            flash::success(&cookies, "Series saved. Next step: add its episodes.");
            Redirect::to(&format!("{}?setup=1", episodes_url(row.id))).into_response()
        }
        Ok(_) => {
            flash::success(&cookies, "New film added!");
            Redirect::to(DASHBOARD).into_response()
        }
        Err(e) => reject(e, echo),
    }
}

#[utoipa::path(
    get,
    path = "/admin/movies/{id}/edit",
    params(("id" = i64, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Title form filled with stored values", body = ApiResponse<MovieForm>),
        (status = 404, description = "Title not found")
    ),
    tag = "Admin"
)]
pub async fn edit_movie_page(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
) -> Response {
    match AdminService::movie(&state, id).await {
        Ok(row) => page(MovieForm::from(&row), "Edit title", &cookies),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/admin/movies/{id}/edit",
    params(("id" = i64, Path, description = "Movie ID")),
    request_body(content = MovieForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated"),
        (status = 404, description = "Title not found"),
        (status = 422, description = "Rejected form", body = ApiResponse<MovieForm>)
    ),
    tag = "Admin"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
    Form(form): Form<MovieForm>,
) -> Response {
    let echo = form.clone().normalized();
    match AdminService::update_movie(&state, id, form).await {
        Ok(_) => {
            flash::success(&cookies, "Title updated.");
            Redirect::to(DASHBOARD).into_response()
        }
        Err(e) => reject(e, echo),
    }
}

#[utoipa::path(
    post,
    path = "/admin/movies/{id}/delete",
    params(("id" = i64, Path, description = "Movie ID")),
    responses(
        (status = 303, description = "Deleted together with its episodes"),
        (status = 404, description = "Title not found")
    ),
    tag = "Admin"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
) -> Response {
    match AdminService::delete_movie(&state, id).await {
        Ok(_) => {
            flash::success(&cookies, "Title deleted.");
            Redirect::to(DASHBOARD).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// --- EPISODE HANDLERS ---

/// Episode manager of a series
#[utoipa::path(
    get,
    path = "/admin/movies/{id}/episodes",
    params(
        ("id" = i64, Path, description = "Movie ID"),
        ("setup" = Option<String>, Query, description = "Present right after a series is created")
    ),
    responses(
        (status = 200, description = "Episodes ordered by season and number", body = ApiResponse<EpisodeManager>),
        (status = 303, description = "Title is a film"),
        (status = 404, description = "Title not found")
    ),
    tag = "Admin"
)]
pub async fn list_episodes(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
    Query(query): Query<EpisodeListQuery>,
) -> Response {
    let movie = match AdminService::series(&state, id).await {
        Ok(SeriesLookup::Series(row)) => row,
        Ok(SeriesLookup::Film(row)) => {
            flash::info(&cookies, "This title is a film; it has no episodes to manage.");
            return Redirect::to(&edit_url(row.id)).into_response();
        }
        Err(e) => return e.into_response(),
    };

    match AdminService::episodes(&state, id).await {
        Ok(episodes) => {
            let manager = EpisodeManager {
                movie: MovieCard::from(movie),
                setup: query.setup.is_some() && episodes.is_empty(),
                episodes,
            };
            page(manager, "Episodes", &cookies)
        }
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/admin/movies/{id}/episodes/new",
    params(("id" = i64, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Empty episode form", body = ApiResponse<EpisodeFormPage>),
        (status = 303, description = "Title is a film"),
        (status = 404, description = "Title not found")
    ),
    tag = "Admin"
)]
pub async fn new_episode_page(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
) -> Response {
    match AdminService::series(&state, id).await {
        Ok(SeriesLookup::Series(row)) => page(
            EpisodeFormPage {
                movie: MovieCard::from(row),
                form: EpisodeForm::blank(),
            },
            "New episode",
            &cookies,
        ),
        Ok(SeriesLookup::Film(row)) => {
            flash::error(&cookies, "Episodes cannot be added to a film.");
            Redirect::to(&edit_url(row.id)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/admin/movies/{id}/episodes/new",
    params(("id" = i64, Path, description = "Movie ID")),
    request_body(content = EpisodeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Episode added, or title is a film"),
        (status = 404, description = "Title not found"),
        (status = 422, description = "Rejected form", body = ApiResponse<EpisodeForm>)
    ),
    tag = "Admin"
)]
pub async fn create_episode(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i64>,
    Form(form): Form<EpisodeForm>,
) -> Response {
    match AdminService::series(&state, id).await {
        Ok(SeriesLookup::Series(_)) => {}
        Ok(SeriesLookup::Film(row)) => {
            flash::error(&cookies, "Episodes cannot be added to a film.");
            return Redirect::to(&edit_url(row.id)).into_response();
        }
        Err(e) => return e.into_response(),
    }

    let echo = form.clone().normalized();
    match AdminService::create_episode(&state, id, form).await {
        Ok(_) => {
            flash::success(&cookies, "Episode added!");
            Redirect::to(&episodes_url(id)).into_response()
        }
        Err(e) => reject(e, echo),
    }
}

#[utoipa::path(
    get,
    path = "/admin/movies/{id}/episodes/{episode_id}/edit",
    params(
        ("id" = i64, Path, description = "Movie ID"),
        ("episode_id" = i64, Path, description = "Episode ID")
    ),
    responses(
        (status = 200, description = "Episode form filled with stored values", body = ApiResponse<EpisodeFormPage>),
        (status = 303, description = "Title is a film"),
        (status = 404, description = "Title or episode not found")
    ),
    tag = "Admin"
)]
pub async fn edit_episode_page(
    State(state): State<AppState>,
    cookies: Cookies,
    Path((id, episode_id)): Path<(i64, i64)>,
) -> Response {
    match AdminService::episode(&state, id, episode_id).await {
        Ok((row, episode)) if row.is_series => page(
            EpisodeFormPage {
                movie: MovieCard::from(row),
                form: EpisodeForm::from(&episode),
            },
            "Edit episode",
            &cookies,
        ),
        Ok((row, _)) => {
            flash::error(&cookies, FILM_EPISODE_EDIT);
            Redirect::to(&edit_url(row.id)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/admin/movies/{id}/episodes/{episode_id}/edit",
    params(
        ("id" = i64, Path, description = "Movie ID"),
        ("episode_id" = i64, Path, description = "Episode ID")
    ),
    request_body(content = EpisodeForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Episode updated, or title is a film"),
        (status = 404, description = "Title or episode not found"),
        (status = 422, description = "Rejected form", body = ApiResponse<EpisodeForm>)
    ),
    tag = "Admin"
)]
pub async fn update_episode(
    State(state): State<AppState>,
    cookies: Cookies,
    Path((id, episode_id)): Path<(i64, i64)>,
    Form(form): Form<EpisodeForm>,
) -> Response {
    match AdminService::series(&state, id).await {
        Ok(SeriesLookup::Series(_)) => {}
        Ok(SeriesLookup::Film(row)) => {
            flash::error(&cookies, FILM_EPISODE_EDIT);
            return Redirect::to(&edit_url(row.id)).into_response();
        }
        Err(e) => return e.into_response(),
    }

    let echo = form.clone().normalized();
    match AdminService::update_episode(&state, id, episode_id, form).await {
        Ok(_) => {
            flash::success(&cookies, "Episode updated.");
            Redirect::to(&episodes_url(id)).into_response()
        }
        Err(e) => reject(e, echo),
    }
}

#[utoipa::path(
    post,
    path = "/admin/movies/{id}/episodes/{episode_id}/delete",
    params(
        ("id" = i64, Path, description = "Movie ID"),
        ("episode_id" = i64, Path, description = "Episode ID")
    ),
    responses(
        (status = 303, description = "Episode deleted"),
        (status = 404, description = "Title or episode not found, or the episode belongs to another title")
    ),
    tag = "Admin"
)]
pub async fn delete_episode(
    State(state): State<AppState>,
    cookies: Cookies,
    Path((id, episode_id)): Path<(i64, i64)>,
) -> Response {
    match AdminService::delete_episode(&state, id, episode_id).await {
        Ok(()) => {
            flash::success(&cookies, "Episode deleted.");
            Redirect::to(&episodes_url(id)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
