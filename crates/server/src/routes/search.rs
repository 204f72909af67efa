use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::Uri,
};
use service::person::queries;
use tracing::debug;

use crate::errors::ApiError;
use crate::extractors::BaseUrl;
use crate::hal::{self, Hal};
use crate::state::AppState;

#[utoipa::path(
    get, path = "/people/search", tag = "search",
    responses((status = 200, description = "Templated links to every named query"))
)]
pub async fn index(BaseUrl(base): BaseUrl) -> Hal<serde_json::Value> {
    Hal(hal::search_index(&base))
}

#[utoipa::path(
    get, path = "/people/search/{query}", tag = "search",
    params(
        ("query" = String, Path, description = "Named query, e.g. findByLastName"),
        ("name" = Option<String>, Query, description = "Value for findByLastName")
    ),
    responses(
        (status = 200, description = "Matching people"),
        (status = 404, description = "Unknown query")
    )
)]
pub async fn run(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    Path(query): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> Result<Hal<serde_json::Value>, ApiError> {
    let query = queries::lookup(&query).ok_or(ApiError::NotFound)?;
    // A missing parameter can only match a null field, and fields are required.
    let found = match params.get(query.param) {
        Some(value) => state.people.find_by(query, value).await,
        None => Vec::new(),
    };
    debug!(query = query.name, hits = found.len(), "search people");

    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or_else(|| uri.path());
    Ok(Hal(hal::search_results(&base, format!("{base}{path}"), &found)))
}
