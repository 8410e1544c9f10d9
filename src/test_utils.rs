use crate::app::create_app;
use crate::common::security;
use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::{DbPool, MIGRATOR};
use crate::modules::auth::model::User;
use crate::modules::auth::repository::AuthRepository;
use crate::modules::catalog::model::{EpisodeDraft, Format, MovieDraft};
use crate::state::AppState;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct horse";

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        session_secret: "test-session-secret".to_string(),
        session_ttl_hours: 12,
        seed_admin_password: "admin123".to_string(),
    }
}

/// Create an in-memory SQLite database for testing.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn setup_test_db() -> DbPool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid in-memory connection string")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to connect to in-memory database");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    pool
}

pub async fn setup_test_app_state() -> AppState {
    AppState::new(test_config(), setup_test_db().await)
}

/// Create axum app for testing, returning the state that backs it.
pub async fn setup_test_app() -> (Router, AppState) {
    let state = setup_test_app_state().await;
    (create_app(state.clone()), state)
}

pub async fn create_user(state: &AppState, username: &str, is_admin: bool) -> User {
    let hash = security::hash_password(TEST_PASSWORD).expect("Failed to hash password");
    AuthRepository::create_user(
        &state.db,
        username,
        &format!("{username}@example.com"),
        &hash,
        is_admin,
    )
    .await
    .expect("Failed to create test user")
}

pub fn form_request(method: &str, uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("Failed to build request")
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

/// `name=value` of the first `Set-Cookie` header for `name`.
pub fn cookie_from<B>(response: &Response<B>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{name}=")))
        .map(str::to_string)
}

/// Signs in through the login endpoint and returns the session cookie.
pub async fn login_cookie(app: &Router, username: &str) -> String {
    let body = format!("username={username}&password=correct+horse");
    let response = app
        .clone()
        .oneshot(form_request("POST", "/auth/login", &body, None))
        .await
        .expect("Login request failed");
    cookie_from(&response, "session").expect("Login did not set a session cookie")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub fn film_draft(title: &str, video_url: &str) -> MovieDraft {
    MovieDraft {
        title: title.to_string(),
        synopsis: format!("{title} synopsis"),
        year: 2020,
        rating: Some("7.0/10".to_string()),
        maturity_badge: None,
        runtime: None,
        spotlight_title: None,
        spotlight_tagline: None,
        thumbnail_url: None,
        hero_url: None,
        background_url: None,
        trailer_url: None,
        categories: None,
        format: Format::Film {
            video_url: video_url.to_string(),
        },
    }
}

pub fn series_draft(title: &str) -> MovieDraft {
    MovieDraft {
        format: Format::Series {
            video_url: None,
            episodes: Vec::new(),
        },
        ..film_draft(title, "")
    }
}

pub fn episode_draft(season: i64, number: i64, title: &str) -> EpisodeDraft {
    EpisodeDraft {
        season_number: season,
        episode_number: number,
        title: title.to_string(),
        synopsis: None,
        runtime: None,
        video_url: format!("https://cdn.example/s{season}e{number}.mp4"),
    }
}
