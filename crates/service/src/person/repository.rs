use async_trait::async_trait;
use models::person::{Person, PersonId, PersonInput, PersonPatch};

use crate::errors::ServiceError;
use crate::person::queries::{NamedQuery, FIND_BY_LAST_NAME};

/// Storage contract for people.
/// Implementations can be in-memory, file-backed, or database-backed.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Validate and insert; the store assigns the id.
    async fn save(&self, input: PersonInput) -> Result<Person, ServiceError>;
    async fn find_by_id(&self, id: PersonId) -> Option<Person>;
    /// Every live record in insertion order.
    async fn find_all(&self) -> Vec<Person>;
    async fn count(&self) -> usize;
    /// Full replace of mutable fields; the id is preserved.
    async fn replace(&self, id: PersonId, input: PersonInput) -> Result<Person, ServiceError>;
    /// Overwrite only the fields present in `patch`.
    async fn patch(&self, id: PersonId, patch: PersonPatch) -> Result<Person, ServiceError>;
    /// Returns whether a record existed.
    async fn delete_by_id(&self, id: PersonId) -> Result<bool, ServiceError>;
    /// Run a registered named query, results in store order.
    async fn find_by(&self, query: &NamedQuery, value: &str) -> Vec<Person>;

    async fn find_by_last_name(&self, name: &str) -> Vec<Person> {
        self.find_by(&FIND_BY_LAST_NAME, name).await
    }
}
