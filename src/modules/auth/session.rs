use anyhow::{anyhow, Result};
use axum::{extract::FromRequestParts, http::request::Parts};
use cookie::SameSite;
use jsonwebtoken::{decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation};
use std::convert::Infallible;
use tower_cookies::{Cookie, Cookies};

use super::dto::SessionClaims;
use super::model::User;
use crate::config::settings::{self, AppConfig};

pub const SESSION_COOKIE: &str = "session";

pub fn issue_token(config: &AppConfig, user: &User) -> Result<String> {
    let now = get_current_timestamp() as usize;
    let ttl = settings::session_ttl_hours(config.session_ttl_hours) as usize * 60 * 60;

    let claims = SessionClaims {
        sub: user.id,
        username: user.username.clone(),
        is_admin: user.is_admin,
        exp: now + ttl,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )
    .map_err(|e| anyhow!(e.to_string()))
}

/// Expired, tampered or malformed tokens all read as "no session".
pub fn decode_token(config: &AppConfig, token: &str) -> Option<SessionClaims> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

pub fn establish(cookies: &Cookies, config: &AppConfig, user: &User) -> Result<()> {
    let token = issue_token(config, user)?;

    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(false); // Keep false for HTTP localhost
    cookie.set_max_age(Some(time::Duration::hours(settings::session_ttl_hours(config.session_ttl_hours))));
    cookies.add(cookie);

    Ok(())
}

pub fn clear(cookies: &Cookies) {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookies.remove(cookie);
}

pub fn current(cookies: &Cookies, config: &AppConfig) -> Option<SessionClaims> {
    let token = cookies.get(SESSION_COOKIE)?;
    decode_token(config, token.value())
}

/// Session attached to the request by `session_middleware`, if any.
#[derive(Debug, Clone)]
pub struct Session(pub Option<SessionClaims>);

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Session(parts.extensions.get::<SessionClaims>().cloned()))
    }
}
