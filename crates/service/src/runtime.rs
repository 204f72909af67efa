//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates can open the people
//! store without depending directly on `common`.

use std::{path::Path, sync::Arc};

use crate::file::person_store::PersonStore;

/// Ensure the data directory exists, then open the configured store.
/// `None` gives an in-memory store.
pub async fn open_people_store(data_file: Option<&Path>) -> anyhow::Result<Arc<PersonStore>> {
    common::env::ensure_env(data_file).await?;
    let store = match data_file {
        Some(path) => PersonStore::open(path).await?,
        None => PersonStore::in_memory(),
    };
    Ok(store)
}
