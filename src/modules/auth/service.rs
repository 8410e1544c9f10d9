use super::dto::{LoginForm, RegisterForm, UserResponse};
use super::model::User;
use super::repository::AuthRepository;
use crate::common::error::{is_unique_violation, AppError, AppResult};
use crate::common::security;
use crate::state::AppState;
use tracing::{info, warn};
use validator::Validate;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const ACCOUNT_EXISTS: &str = "An account with this username or email already exists.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";

pub struct AuthService;

impl AuthService {
    pub async fn register(state: &AppState, form: RegisterForm) -> AppResult<UserResponse> {
        let form = form.normalized();

        if let Err(errors) = form.validate() {
            let message = ["username", "email", "password"]
                .iter()
                .filter_map(|field| errors.field_errors().get(*field).and_then(|errs| errs.first()).cloned())
                .find_map(|err| err.message.map(|m| m.to_string()))
                .unwrap_or_else(|| "All fields are required.".to_string());
            return Err(AppError::Validation(message));
        }

        if form.password != form.confirm {
            return Err(AppError::Validation(PASSWORD_MISMATCH.to_string()));
        }

        if AuthRepository::find_user_by_username_or_email(&state.db, &form.username, &form.email)
            .await?
            .is_some()
        {
            return Err(AppError::Validation(ACCOUNT_EXISTS.to_string()));
        }

        let password_hash = security::hash_password(&form.password)?;

        // Both columns are UNIQUE, so a concurrent registration lands here.
        let user = AuthRepository::create_user(&state.db, &form.username, &form.email, &password_hash, false)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Validation(ACCOUNT_EXISTS.to_string())
                } else {
                    AppError::Database(e)
                }
            })?;

        info!("Registered user {} (id {})", user.username, user.id);
        Ok(UserResponse::from(user))
    }

    /// The same error is returned for an unknown username and a wrong password.
    pub async fn login(state: &AppState, form: LoginForm) -> AppResult<User> {
        let username = form.username.trim();

        let user = match AuthRepository::find_user_by_username(&state.db, username).await? {
            Some(user) => user,
            None => {
                warn!("Login failed: unknown username");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if security::verify_password(&form.password, &user.password_hash).is_err() {
            warn!("Login failed: bad password for user id {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        info!("User {} signed in", user.username);
        Ok(user)
    }

    pub async fn find_user(state: &AppState, id: i64) -> AppResult<Option<User>> {
        Ok(AuthRepository::find_user_by_id(&state.db, id).await?)
    }
}
