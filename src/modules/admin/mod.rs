use axum::routing::{get, post};
use axum::{middleware, Router};
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(handler::dashboard))
        .route("/admin/", get(handler::dashboard))
        .route("/admin/movies/new", get(handler::new_movie_page).post(handler::create_movie))
        .route("/admin/movies/{id}/edit", get(handler::edit_movie_page).post(handler::update_movie))
        .route("/admin/movies/{id}/delete", post(handler::delete_movie))
        .route("/admin/movies/{id}/episodes", get(handler::list_episodes))
        .route(
            "/admin/movies/{id}/episodes/new",
            get(handler::new_episode_page).post(handler::create_episode),
        )
        .route(
            "/admin/movies/{id}/episodes/{episode_id}/edit",
            get(handler::edit_episode_page).post(handler::update_episode),
        )
        .route(
            "/admin/movies/{id}/episodes/{episode_id}/delete",
            post(handler::delete_episode),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::role::admin_guard,
        ))
}
