use axum::Router;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;
pub mod session;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", get(handler::register_page).post(handler::register))
        .route("/auth/login", get(handler::login_page).post(handler::login))
        .route("/auth/logout", get(handler::logout))
}
