use std::sync::Arc;

use service::person::repository::PersonRepository;

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    pub people: Arc<dyn PersonRepository>,
    pub links: LinkBase,
}

/// Where absolute link hrefs are rooted.
#[derive(Clone, Debug)]
pub struct LinkBase {
    /// Configured public URL; wins over request headers when set.
    pub public_url: Option<String>,
    /// Used when neither a public URL nor a `Host` header is available.
    pub fallback: String,
}

impl LinkBase {
    pub fn new(public_url: Option<String>, bind_addr: &str) -> Self {
        Self { public_url, fallback: format!("http://{bind_addr}") }
    }
}

impl AppState {
    pub fn new(people: Arc<dyn PersonRepository>, links: LinkBase) -> Self {
        Self { people, links }
    }
}
