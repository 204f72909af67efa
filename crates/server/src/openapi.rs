use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Body of create and full replace. Both fields are required.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PersonInputDoc {
    pub first_name: String,
    pub last_name: String,
}

/// Body of a partial update. Absent fields are left untouched; `null` is rejected.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PersonPatchDoc {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::discovery::root,
        crate::routes::discovery::profile,
        crate::routes::discovery::people_profile,
        crate::routes::people::list,
        crate::routes::people::get,
        crate::routes::people::create,
        crate::routes::people::replace,
        crate::routes::people::patch,
        crate::routes::people::delete,
        crate::routes::search::index,
        crate::routes::search::run,
    ),
    components(
        schemas(
            HealthResponse,
            PersonInputDoc,
            PersonPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "discovery"),
        (name = "people"),
        (name = "search")
    )
)]
pub struct ApiDoc;
