use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::docs::ApiDoc;
use axum::{middleware, Router};
use crate::state::AppState;

pub fn configure_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_routes())
        .merge(crate::modules::catalog::router())
        .merge(crate::modules::auth::router())
        .merge(crate::modules::admin::router(state.clone()))
        .layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::session_middleware,
        ))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
}
