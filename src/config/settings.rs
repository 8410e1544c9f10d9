use serde::Deserialize;
use crate::config::env::{self, EnvKey};

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
/// One year.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Keeps the session lifetime between one hour and `MAX_SESSION_TTL_HOURS`.
pub fn session_ttl_hours(raw: i64) -> i64 {
    raw.clamp(1, MAX_SESSION_TTL_HOURS)
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub seed_admin_password: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: env::get_or(EnvKey::DatabaseUrl, "sqlite://catalog.db?mode=rwc"),
            session_secret: env::get(EnvKey::SessionSecret)?,
            session_ttl_hours: session_ttl_hours(env::get_parsed(EnvKey::SessionTtlHours, 12)),
            seed_admin_password: env::get_or(EnvKey::SeedAdminPassword, DEFAULT_ADMIN_PASSWORD),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ttl_is_clamped() {
        assert_eq!(session_ttl_hours(12), 12);
        assert_eq!(session_ttl_hours(0), 1);
        assert_eq!(session_ttl_hours(-5), 1);
        assert_eq!(session_ttl_hours(i64::MAX), MAX_SESSION_TTL_HOURS);
    }
}
