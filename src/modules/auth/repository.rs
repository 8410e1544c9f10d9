use crate::infrastructure::db::pool::DbPool;
use crate::modules::auth::model::User;
use time::OffsetDateTime;

const USER_COLUMNS: &str = "id, username, email, password_hash, is_admin, created_at";

pub struct AuthRepository;

impl AuthRepository {
    pub async fn create_user(
        pool: &DbPool,
        username: &str,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, is_admin, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(is_admin)
            .bind(OffsetDateTime::now_utc())
            .fetch_one(pool)
            .await
    }

    pub async fn find_user_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact, case-sensitive match.
    pub async fn find_user_by_username(pool: &DbPool, username: &str) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_user_by_username_or_email(
        pool: &DbPool,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ? OR email = ? LIMIT 1");
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_users(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }
}
