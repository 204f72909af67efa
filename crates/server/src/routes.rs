use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod discovery;
pub mod people;
pub mod search;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: discovery, people, search and docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let discovery = Router::new()
        .route("/", get(discovery::root))
        .route("/profile", get(discovery::profile))
        .route("/profile/people", get(discovery::people_profile));

    // `/people/search` is static and takes priority over `/people/:id`.
    let people = Router::new()
        .route("/people", get(people::list).post(people::create))
        .route("/people/search", get(search::index))
        .route("/people/search/:query", get(search::run))
        .route(
            "/people/:id",
            get(people::get)
                .put(people::replace)
                .patch(people::patch)
                .delete(people::delete),
        );

    let ops = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    discovery
        .merge(people)
        .merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
