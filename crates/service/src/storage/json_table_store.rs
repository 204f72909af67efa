use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

pub type RowId = u64;

const FIRST_ID: RowId = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Table<V> {
    next_id: RowId,
    rows: BTreeMap<RowId, V>,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self { next_id: FIRST_ID, rows: BTreeMap::new() }
    }
}

/// Ordered table keyed by server-assigned ids, optionally persisted as JSON.
///
/// Ids come from a counter that only moves forward and is stored with the rows,
/// so a deleted id is never handed out again. Rows iterate in id order, which is
/// insertion order. Every mutation holds the write guard until the file is
/// rewritten; a failed write rolls the in-memory change back.
pub struct JsonTableStore<V> {
    inner: RwLock<Table<V>>,
    file_path: Option<PathBuf>,
}

impl<V> JsonTableStore<V>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// A table that lives only as long as the process.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(Table::default()), file_path: None })
    }

    /// Open a file-backed table. Creates the file with an empty table if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        let table: Table<V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("corrupt table file {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let empty = Table::default();
                write_table(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(storage_err(e)),
        };
        debug!(path = %file_path.display(), rows = table.rows.len(), next_id = table.next_id, "table loaded");

        Ok(Arc::new(Self { inner: RwLock::new(table), file_path: Some(file_path) }))
    }

    async fn persist(&self, table: &Table<V>) -> Result<(), ServiceError> {
        match &self.file_path {
            Some(path) => write_table(path, table).await,
            None => Ok(()),
        }
    }

    /// All rows in id order.
    pub async fn list(&self) -> Vec<V> {
        let table = self.inner.read().await;
        table.rows.values().cloned().collect()
    }

    /// Rows matching `pred`, in id order.
    pub async fn filter<F>(&self, pred: F) -> Vec<V>
    where
        F: Fn(&V) -> bool,
    {
        let table = self.inner.read().await;
        table.rows.values().filter(|v| pred(v)).cloned().collect()
    }

    pub async fn get(&self, id: RowId) -> Option<V> {
        let table = self.inner.read().await;
        table.rows.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    /// Allocate the next id, build the row from it and persist.
    pub async fn insert_with<F>(&self, build: F) -> Result<V, ServiceError>
    where
        F: FnOnce(RowId) -> V,
    {
        let mut table = self.inner.write().await;
        let id = table.next_id;
        let row = build(id);
        table.next_id = id + 1;
        table.rows.insert(id, row.clone());
        if let Err(e) = self.persist(&table).await {
            // The id stays consumed.
            table.rows.remove(&id);
            return Err(e);
        }
        Ok(row)
    }

    /// Mutate an existing row in place and persist.
    ///
    /// `NotFound` when `id` is absent. If `f` fails the row is left untouched.
    pub async fn update<F>(&self, id: RowId, entity: &str, f: F) -> Result<V, ServiceError>
    where
        F: FnOnce(&mut V) -> Result<(), ServiceError>,
    {
        let mut table = self.inner.write().await;
        let current = table.rows.get(&id).cloned().ok_or_else(|| ServiceError::not_found(entity))?;
        let mut next = current.clone();
        f(&mut next)?;
        table.rows.insert(id, next.clone());
        if let Err(e) = self.persist(&table).await {
            table.rows.insert(id, current);
            return Err(e);
        }
        Ok(next)
    }

    /// Remove a row and persist; returns whether it existed.
    pub async fn remove(&self, id: RowId) -> Result<bool, ServiceError> {
        let mut table = self.inner.write().await;
        let Some(removed) = table.rows.remove(&id) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(&table).await {
            table.rows.insert(id, removed);
            return Err(e);
        }
        Ok(true)
    }
}

async fn write_table<V: Serialize>(path: &Path, table: &Table<V>) -> Result<(), ServiceError> {
    let data = serde_json::to_vec(table).map_err(|e| ServiceError::Storage(e.to_string()))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, data).await.map_err(storage_err)?;
    fs::rename(&tmp, path).await.map_err(storage_err)?;
    Ok(())
}

fn storage_err(e: std::io::Error) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_table_store_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn ids_are_sequential_and_never_reused() -> Result<(), anyhow::Error> {
        let store = JsonTableStore::<String>::in_memory();
        let a = store.insert_with(|id| format!("a{id}")).await?;
        let b = store.insert_with(|id| format!("b{id}")).await?;
        assert_eq!(a, "a1");
        assert_eq!(b, "b2");

        assert!(store.remove(2).await?);
        let c = store.insert_with(|id| format!("c{id}")).await?;
        assert_eq!(c, "c3");
        assert_eq!(store.list().await, vec!["a1".to_string(), "c3".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let store = JsonTableStore::<String>::in_memory();
        let res = store.update(7, "row", |_| Ok(())).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn failed_update_leaves_row_untouched() -> Result<(), anyhow::Error> {
        let store = JsonTableStore::<String>::in_memory();
        store.insert_with(|_| "orig".to_string()).await?;
        let res = store
            .update(1, "row", |v| {
                v.push_str("-changed");
                Err(ModelError::required("row").into())
            })
            .await;
        assert!(matches!(res, Err(ServiceError::Model(_))));
        assert_eq!(store.get(1).await.as_deref(), Some("orig"));
        Ok(())
    }

    #[tokio::test]
    async fn remove_missing_is_false() -> Result<(), anyhow::Error> {
        let store = JsonTableStore::<String>::in_memory();
        assert!(!store.remove(1).await?);
        assert_eq!(store.len().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn file_backed_table_reloads_rows_and_counter() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = JsonTableStore::<String>::open(&tmp).await?;
        assert_eq!(store.len().await, 0);

        store.insert_with(|_| "one".to_string()).await?;
        store.insert_with(|_| "two".to_string()).await?;
        store.update(1, "row", |v| { *v = "uno".into(); Ok(()) }).await?;
        assert!(store.remove(2).await?);

        let reloaded = JsonTableStore::<String>::open(&tmp).await?;
        assert_eq!(reloaded.list().await, vec!["uno".to_string()]);
        let next = reloaded.insert_with(|id| id.to_string()).await?;
        assert_eq!(next, "3");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(&tmp, b"not json").await?;
        let res = JsonTableStore::<String>::open(&tmp).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
