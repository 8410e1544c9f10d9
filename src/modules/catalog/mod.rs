use axum::Router;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::home))
        .route("/categories", get(handler::categories))
        .route("/movie/{id}", get(handler::movie_detail))
        .route("/search", get(handler::search))
}
