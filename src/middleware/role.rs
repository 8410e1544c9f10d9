use crate::common::error::AppResult;
use crate::common::flash;
use crate::modules::auth::dto::SessionClaims;
use crate::modules::auth::model::User;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;
use tracing::{info, warn};
use url::form_urlencoded;

/// Outcome of the admin check, decided before any admin handler runs.
#[derive(Debug)]
pub enum Access {
    Granted(User),
    Anonymous,
    Forbidden,
}

/// The admin flag is read from the stored account, not from the cookie, so a
/// revoked role or deleted account takes effect on the next request.
pub async fn authorize(state: &AppState, claims: Option<&SessionClaims>) -> AppResult<Access> {
    let Some(claims) = claims else {
        return Ok(Access::Anonymous);
    };

    match AuthService::find_user(state, claims.sub).await? {
        Some(user) if user.is_admin => Ok(Access::Granted(user)),
        Some(_) => Ok(Access::Forbidden),
        None => Ok(Access::Anonymous),
    }
}

pub fn login_redirect(target: &str) -> Redirect {
    let next: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
    Redirect::to(&format!("/auth/login?next={}", next))
}

pub async fn admin_guard(
    State(state): State<AppState>,
    cookies: Cookies,
    req: Request,
    next: Next,
) -> Response {
    let claims = req.extensions().get::<SessionClaims>().cloned();

    match authorize(&state, claims.as_ref()).await {
        Ok(Access::Granted(user)) => {
            if req.method() != Method::GET {
                info!("Admin {} (id {}): {} {}", user.username, user.id, req.method(), req.uri().path());
            }
            next.run(req).await
        }
        Ok(access) => {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| req.uri().path().to_string());
            warn!("Admin access denied ({:?}) for {}", access, target);
            flash::error(&cookies, "This area is reserved for catalog administrators.");
            login_redirect(&target).into_response()
        }
        Err(e) => e.into_response(),
    }
}
