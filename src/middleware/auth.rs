use crate::modules::auth::session;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

/// Decodes the session cookie and exposes its claims to handlers and guards.
pub async fn session_middleware(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Response {
    match session::current(&cookies, &state.config) {
        Some(claims) => {
            req.extensions_mut().insert(claims);
        }
        None => {
            // A stale or forged cookie is dropped so the browser stops sending it.
            if cookies.get(session::SESSION_COOKIE).is_some() {
                session::clear(&cookies);
            }
        }
    }

    next.run(req).await
}
