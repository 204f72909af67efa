use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::person::{Person, PersonId, PersonInput, PersonPatch};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::person::queries::NamedQuery;
use crate::person::repository::PersonRepository;
use crate::storage::json_table_store::JsonTableStore;

/// People table, in memory or persisted to a JSON file.
#[derive(Clone)]
pub struct PersonStore {
    table: Arc<JsonTableStore<Person>>,
}

impl PersonStore {
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { table: JsonTableStore::in_memory() })
    }

    /// Open the store at `path`, creating an empty file if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let table = JsonTableStore::<Person>::open(path).await?;
        Ok(Arc::new(Self { table }))
    }
}

#[async_trait]
impl PersonRepository for PersonStore {
    #[instrument(skip(self, input))]
    async fn save(&self, input: PersonInput) -> Result<Person, ServiceError> {
        let new = input.validate()?;
        let person = self.table.insert_with(|id| Person::from_new(id, new)).await?;
        info!(id = person.id, "person created");
        Ok(person)
    }

    async fn find_by_id(&self, id: PersonId) -> Option<Person> {
        self.table.get(id).await
    }

    async fn find_all(&self) -> Vec<Person> {
        self.table.list().await
    }

    async fn count(&self) -> usize {
        self.table.len().await
    }

    #[instrument(skip(self, input))]
    async fn replace(&self, id: PersonId, input: PersonInput) -> Result<Person, ServiceError> {
        let new = input.validate()?;
        let person = self
            .table
            .update(id, "person", |p| {
                p.replace_with(new);
                Ok(())
            })
            .await?;
        info!(id, "person replaced");
        Ok(person)
    }

    #[instrument(skip(self, patch))]
    async fn patch(&self, id: PersonId, patch: PersonPatch) -> Result<Person, ServiceError> {
        let person = self
            .table
            .update(id, "person", |p| patch.apply(p).map_err(ServiceError::from))
            .await?;
        info!(id, "person patched");
        Ok(person)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: PersonId) -> Result<bool, ServiceError> {
        let existed = self.table.remove(id).await?;
        if existed {
            info!(id, "person deleted");
        } else {
            debug!(id, "delete of unknown person ignored");
        }
        Ok(existed)
    }

    async fn find_by(&self, query: &NamedQuery, value: &str) -> Vec<Person> {
        let found = self.table.filter(|p| query.matches(p, value)).await;
        debug!(query = query.name, value, hits = found.len(), "named query");
        found
    }
}
