use utoipa::OpenApi;
use crate::common::flash::{FlashLevel, FlashMessage};
use crate::modules::admin::dto::{EpisodeForm, EpisodeFormPage, EpisodeManager, MovieForm};
use crate::modules::auth::dto::{LoginForm, LoginPage, RegisterEcho, RegisterForm, UserResponse};
use crate::modules::catalog::dto::{CategorySection, HomePage, MovieCard, MovieDetail, SearchResults, SeasonGroup};
use crate::modules::catalog::model::{Episode, Format, Movie};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::catalog::handler::home,
        crate::modules::catalog::handler::categories,
        crate::modules::catalog::handler::movie_detail,
        crate::modules::catalog::handler::search,
        crate::modules::auth::handler::register_page,
        crate::modules::auth::handler::register,
        crate::modules::auth::handler::login_page,
        crate::modules::auth::handler::login,
        crate::modules::auth::handler::logout,
        crate::modules::admin::handler::dashboard,
        crate::modules::admin::handler::new_movie_page,
        crate::modules::admin::handler::create_movie,
        crate::modules::admin::handler::edit_movie_page,
        crate::modules::admin::handler::update_movie,
        crate::modules::admin::handler::delete_movie,
        crate::modules::admin::handler::list_episodes,
        crate::modules::admin::handler::new_episode_page,
        crate::modules::admin::handler::create_episode,
        crate::modules::admin::handler::edit_episode_page,
        crate::modules::admin::handler::update_episode,
        crate::modules::admin::handler::delete_episode,
    ),
    components(
        schemas(
            FlashLevel, FlashMessage,
            Movie, Format, Episode, MovieCard, CategorySection, HomePage, SeasonGroup, MovieDetail, SearchResults,
            RegisterForm, RegisterEcho, LoginForm, LoginPage, UserResponse,
            MovieForm, EpisodeForm, EpisodeManager, EpisodeFormPage,
        )
    ),
    tags(
        (name = "Catalog", description = "Public browsing, detail and search"),
        (name = "Auth", description = "Registration and cookie sessions"),
        (name = "Admin", description = "Catalog management, administrators only")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    crate::modules::auth::session::SESSION_COOKIE,
                ))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_area() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/movie/{id}", "/auth/login", "/admin/", "/admin/movies/{id}/episodes/{episode_id}/edit"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("session_cookie"));
    }
}
