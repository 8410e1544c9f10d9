use super::dto::{LoginForm, LoginPage, LoginQuery, RegisterEcho, RegisterForm};
use super::service::AuthService;
use super::session::{self, Session};
use crate::common::error::AppError;
use crate::common::flash;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_cookies::Cookies;
use tracing::error;

/// Only same-site absolute paths are honoured as post-login targets.
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
}

/// Registration form
#[utoipa::path(
    get,
    path = "/auth/register",
    responses(
        (status = 200, description = "Empty registration form", body = ApiResponse<RegisterEcho>),
        (status = 303, description = "Already signed in")
    ),
    tag = "Auth"
)]
pub async fn register_page(session: Session, cookies: Cookies) -> Response {
    if session.is_authenticated() {
        return Redirect::to("/").into_response();
    }
    let page = ApiResponse::success(RegisterEcho::default(), "Create an account")
        .with_flash(flash::take(&cookies));
    ApiSuccess(page, StatusCode::OK).into_response()
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, redirect to login"),
        (status = 422, description = "Rejected form", body = ApiResponse<RegisterEcho>)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    cookies: Cookies,
    Form(form): Form<RegisterForm>,
) -> Response {
    if session.is_authenticated() {
        return Redirect::to("/").into_response();
    }

    let echo = form.echo();
    match AuthService::register(&state, form).await {
        Ok(_) => {
            flash::success(&cookies, "Account created. You can now sign in.");
            Redirect::to("/auth/login").into_response()
        }
        Err(AppError::Validation(message)) => ApiSuccess(
            ApiResponse::rejected(echo, &message),
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Login form
#[utoipa::path(
    get,
    path = "/auth/login",
    params(("next" = Option<String>, Query, description = "Where to go after signing in")),
    responses(
        (status = 200, description = "Empty login form", body = ApiResponse<LoginPage>),
        (status = 303, description = "Already signed in")
    ),
    tag = "Auth"
)]
pub async fn login_page(session: Session, cookies: Cookies, Query(query): Query<LoginQuery>) -> Response {
    if session.is_authenticated() {
        return Redirect::to("/").into_response();
    }
    let page = LoginPage {
        username: String::new(),
        next: safe_next(query.next.as_deref()).map(str::to_string),
    };
    ApiSuccess(
        ApiResponse::success(page, "Sign in").with_flash(flash::take(&cookies)),
        StatusCode::OK,
    )
    .into_response()
}

/// Login user and open a session
#[utoipa::path(
    post,
    path = "/auth/login",
    params(("next" = Option<String>, Query, description = "Where to go after signing in")),
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, session cookie set"),
        (status = 401, description = "Invalid credentials", body = ApiResponse<LoginPage>)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    cookies: Cookies,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Response {
    if session.is_authenticated() {
        return Redirect::to("/").into_response();
    }

    let next = safe_next(query.next.as_deref()).map(str::to_string);
    let username = form.username.trim().to_string();

    match AuthService::login(&state, form).await {
        Ok(user) => {
            if let Err(e) = session::establish(&cookies, &state.config, &user) {
                error!("Failed to issue session: {}", e);
                return AppError::Internal(e).into_response();
            }
            flash::success(&cookies, "Welcome back!");
            Redirect::to(next.as_deref().unwrap_or("/")).into_response()
        }
        Err(AppError::Unauthorized(message)) => ApiSuccess(
            ApiResponse::rejected(LoginPage { username, next }, &message),
            StatusCode::UNAUTHORIZED,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Logout user
#[utoipa::path(
    get,
    path = "/auth/logout",
    responses(
        (status = 303, description = "Session cleared, or login required")
    ),
    tag = "Auth"
)]
pub async fn logout(session: Session, cookies: Cookies) -> Response {
    if !session.is_authenticated() {
        return crate::middleware::role::login_redirect("/auth/logout").into_response();
    }

    session::clear(&cookies);
    flash::success(&cookies, "You are signed out.");
    Redirect::to("/").into_response()
}

#[cfg(test)]
mod tests {
    use super::safe_next;

    #[test]
    fn next_must_be_a_local_path() {
        assert_eq!(safe_next(Some("/admin/movies/new")), Some("/admin/movies/new"));
        assert_eq!(safe_next(Some("https://evil.example")), None);
        assert_eq!(safe_next(Some("//evil.example")), None);
        assert_eq!(safe_next(Some("/\\evil.example")), None);
        assert_eq!(safe_next(None), None);
    }
}
