use std::collections::HashMap;
use std::sync::Arc;

use moka::future::Cache;
use smol_str::SmolStr;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("no settings record was provisioned for {0}")]
    NotProvisioned(SmolStr),
}

/// Settings records keyed by entity id, one lock per record.
///
/// Commands for the same id are serialized through that id's lock, commands for different ids never
/// wait on each other. The backing cache is built without capacity or expiry so records live for
/// as long as the process does.
pub struct KeyedStore<V> {
    records: Cache<SmolStr, Arc<Mutex<V>>>,
}

impl<V> KeyedStore<V>
where
    V: Clone + Default + Send + Sync + 'static,
{
    pub fn new() -> KeyedStore<V> {
        KeyedStore {
            records: Cache::builder().build(),
        }
    }

    /// Provisions a default record for `id` unless one already exists.
    ///
    /// Concurrent callers for the same id are coalesced, the record is only created once.
    pub async fn ensure(&self, id: &str) -> Arc<Mutex<V>> {
        self.records
            .get_with(SmolStr::new(id), async { Arc::new(Mutex::new(V::default())) })
            .await
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub async fn get(&self, id: &str) -> Result<Arc<Mutex<V>>, StoreError> {
        match self.records.get(id).await {
            Some(record) => Ok(record),
            None => {
                error!(id = id, "settings record requested before it was provisioned");
                Err(StoreError::NotProvisioned(SmolStr::new(id)))
            }
        }
    }

    pub async fn read<R>(&self, id: &str, reader: impl FnOnce(&V) -> R) -> Result<R, StoreError> {
        let record = self.get(id).await?;
        let guard = record.lock().await;
        Ok(reader(&guard))
    }

    pub async fn update<R>(
        &self,
        id: &str,
        writer: impl FnOnce(&mut V) -> R,
    ) -> Result<R, StoreError> {
        let record = self.get(id).await?;
        let mut guard = record.lock().await;
        Ok(writer(&mut guard))
    }

    /// Replaces the record for `id`, used when restoring a snapshot.
    pub async fn insert(&self, id: &str, value: V) {
        let record = self.ensure(id).await;
        *record.lock().await = value;
    }

    pub async fn snapshot(&self) -> HashMap<String, V> {
        let entries: Vec<(Arc<SmolStr>, Arc<Mutex<V>>)> = self.records.iter().collect();

        let mut records = HashMap::with_capacity(entries.len());
        for (id, record) in entries {
            let value = record.lock().await.clone();
            records.insert(id.to_string(), value);
        }

        records
    }
}
