use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use models::person::{PersonId, PersonInput, PersonPatch};
use service::pagination::PageRequest;
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::extractors::{BaseUrl, JsonBody};
use crate::hal::{self, Hal};
use crate::state::AppState;

/// Non-numeric ids name no record.
fn parse_id(raw: &str) -> Result<PersonId, ApiError> {
    raw.parse::<PersonId>().map_err(|_| ApiError::NotFound)
}

#[utoipa::path(
    get, path = "/people", tag = "people",
    params(
        ("page" = Option<u32>, Query, description = "0-based page index"),
        ("size" = Option<u32>, Query, description = "Page size, default 20")
    ),
    responses((status = 200, description = "HAL collection of people"))
)]
pub async fn list(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    Query(page): Query<PageRequest>,
) -> Hal<serde_json::Value> {
    let all = state.people.find_all().await;
    let (items, meta) = page.slice(all);
    debug!(total = meta.total_elements, page = meta.number, "list people");
    Hal(hal::people_collection(&base, &items, meta))
}

#[utoipa::path(
    get, path = "/people/{id}", tag = "people",
    params(("id" = u64, Path, description = "Person id")),
    responses(
        (status = 200, description = "HAL person"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    Path(id): Path<String>,
) -> Result<Hal<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    let person = state.people.find_by_id(id).await.ok_or(ApiError::NotFound)?;
    Ok(Hal(hal::person_model(&base, &person)))
}

#[utoipa::path(
    post, path = "/people", tag = "people",
    request_body = crate::openapi::PersonInputDoc,
    responses(
        (status = 201, description = "Created; Location points at the new person"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    JsonBody(input): JsonBody<PersonInput>,
) -> Result<Response, ApiError> {
    let person = state.people.save(input).await?;
    let location = hal::person_href(&base, person.id);
    info!(id = person.id, %location, "created person");
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

#[utoipa::path(
    put, path = "/people/{id}", tag = "people",
    params(("id" = u64, Path, description = "Person id")),
    request_body = crate::openapi::PersonInputDoc,
    responses(
        (status = 204, description = "Replaced; Location points at the person"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn replace(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<PersonInput>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let person = state.people.replace(id, input).await?;
    let location = hal::person_href(&base, person.id);
    info!(id, "replaced person");
    Ok((StatusCode::NO_CONTENT, [(header::LOCATION, location)]).into_response())
}

#[utoipa::path(
    patch, path = "/people/{id}", tag = "people",
    params(("id" = u64, Path, description = "Person id")),
    request_body = crate::openapi::PersonPatchDoc,
    responses(
        (status = 204, description = "Patched"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<PersonPatch>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if patch.is_empty() {
        debug!(id, "patch carries no fields");
    }
    state.people.patch(id, patch).await?;
    info!(id, "patched person");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/people/{id}", tag = "people",
    params(("id" = u64, Path, description = "Person id")),
    responses((status = 204, description = "Deleted, or already absent"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    // Unknown or malformed ids are already absent.
    if let Ok(id) = id.parse::<PersonId>() {
        let existed = state.people.delete_by_id(id).await?;
        info!(id, existed, "delete person");
    }
    Ok(StatusCode::NO_CONTENT)
}
