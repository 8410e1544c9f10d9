use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::model::User;

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "All fields are required."))]
    pub username: String,
    #[validate(length(min = 1, message = "All fields are required."))]
    pub email: String,
    #[validate(length(min = 1, message = "All fields are required."))]
    pub password: String,
    pub confirm: String,
}

impl RegisterForm {
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }

    /// Values sent back on a rejected submission. Passwords are never echoed.
    pub fn echo(&self) -> RegisterEcho {
        RegisterEcho {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct RegisterEcho {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct LoginPage {
    pub username: String,
    pub next: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            is_admin: u.is_admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i64,
    pub username: String,
    pub is_admin: bool,
    pub exp: usize,
    pub iat: usize,
}
