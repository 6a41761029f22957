use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::{CatalogStore, MembershipStore};
use crate::errors::CoreError;
use crate::models::entry::PortfolioEntry;
use crate::models::stock::StockRecord;

/// In-memory catalog store.
///
/// Reference implementation of the `CatalogStore` contract; also what
/// the default `PortfolioTracker` composition runs on. Both maps live
/// behind a single lock so the symbol index and the id index can never
/// drift apart.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<CatalogMaps>,
}

#[derive(Default)]
struct CatalogMaps {
    /// canonical symbol → record
    by_symbol: HashMap<String, StockRecord>,
    /// surrogate id → canonical symbol
    by_id: HashMap<Uuid, String>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn get_by_symbol(&self, symbol: &str) -> Result<Option<StockRecord>, CoreError> {
        let key = StockRecord::canonical_symbol(symbol);
        Ok(self.inner.read().await.by_symbol.get(&key).cloned())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<StockRecord>, CoreError> {
        let maps = self.inner.read().await;
        Ok(maps
            .by_id
            .get(&id)
            .and_then(|symbol| maps.by_symbol.get(symbol))
            .cloned())
    }

    async fn insert_if_absent(&self, record: StockRecord) -> Result<StockRecord, CoreError> {
        let key = StockRecord::canonical_symbol(&record.symbol);
        let mut maps = self.inner.write().await;
        if let Some(existing) = maps.by_symbol.get(&key) {
            // First writer wins; the raced import is dropped.
            return Ok(existing.clone());
        }
        maps.by_id.insert(record.id, key.clone());
        maps.by_symbol.insert(key, record.clone());
        Ok(record)
    }
}

/// In-memory membership store.
///
/// Entries per user are kept in a Vec, preserving insertion order for
/// stable listings. The check-then-insert in `insert_unique` runs under
/// one write lock, which is what keeps concurrent adds of the same pair
/// from both succeeding.
#[derive(Default)]
pub struct InMemoryMembershipStore {
    /// user id → entries, oldest first
    entries: RwLock<HashMap<String, Vec<PortfolioEntry>>>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn entries_for_user(&self, user_id: &str) -> Result<Vec<PortfolioEntry>, CoreError> {
        Ok(self
            .entries
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_unique(&self, entry: PortfolioEntry) -> Result<bool, CoreError> {
        let mut entries = self.entries.write().await;
        let user_entries = entries.entry(entry.user_id.clone()).or_default();
        if user_entries.iter().any(|e| e.stock_id == entry.stock_id) {
            return Ok(false);
        }
        user_entries.push(entry);
        Ok(true)
    }

    async fn delete(&self, user_id: &str, stock_id: Uuid) -> Result<bool, CoreError> {
        let mut entries = self.entries.write().await;
        let Some(user_entries) = entries.get_mut(user_id) else {
            return Ok(false);
        };
        let before = user_entries.len();
        user_entries.retain(|e| e.stock_id != stock_id);
        Ok(user_entries.len() < before)
    }
}
