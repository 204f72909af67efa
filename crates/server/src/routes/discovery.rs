use crate::extractors::BaseUrl;
use crate::hal::{self, Alps, Hal};

#[utoipa::path(get, path = "/", tag = "discovery", responses((status = 200, description = "Root links")))]
pub async fn root(BaseUrl(base): BaseUrl) -> Hal<serde_json::Value> {
    Hal(hal::root_index(&base))
}

#[utoipa::path(get, path = "/profile", tag = "discovery", responses((status = 200, description = "Profile links")))]
pub async fn profile(BaseUrl(base): BaseUrl) -> Hal<serde_json::Value> {
    Hal(hal::profile_index(&base))
}

#[utoipa::path(
    get, path = "/profile/people", tag = "discovery",
    responses((status = 200, description = "ALPS descriptor"))
)]
pub async fn people_profile(BaseUrl(base): BaseUrl) -> Alps<serde_json::Value> {
    Alps(hal::people_alps(&base))
}
