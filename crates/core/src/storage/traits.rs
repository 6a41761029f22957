use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::entry::PortfolioEntry;
use crate::models::stock::StockRecord;

/// Durable storage for catalog records.
///
/// The contract carries the atomicity the services rely on: any
/// implementation (in-memory, SQL, KV) must make `insert_if_absent`
/// a single atomic step, so two concurrent imports of the same symbol
/// leave exactly one record behind.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Look up a record by canonical (uppercase) symbol.
    /// Implementations canonicalize the query themselves, so callers
    /// may pass any case.
    async fn get_by_symbol(&self, symbol: &str) -> Result<Option<StockRecord>, CoreError>;

    /// Look up a record by surrogate id.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<StockRecord>, CoreError>;

    /// Insert `record` unless a record for its symbol already exists.
    /// Returns the record that is in the store afterwards — the new one
    /// on a clean insert, the pre-existing one if the symbol was taken.
    async fn insert_if_absent(&self, record: StockRecord) -> Result<StockRecord, CoreError>;
}

/// Durable storage for the user ↔ stock membership relation.
///
/// `insert_unique` is the check-then-insert; it must be atomic with
/// respect to concurrent inserts of the same `(user_id, stock_id)` pair
/// (uniqueness constraint or equivalent serialization). A plain read
/// followed by a write is not an acceptable implementation.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// All entries for a user, in insertion order. The order carries no
    /// meaning but must be stable within a single read.
    async fn entries_for_user(&self, user_id: &str) -> Result<Vec<PortfolioEntry>, CoreError>;

    /// Insert the entry if the `(user_id, stock_id)` pair is not present.
    /// Returns `true` if inserted, `false` if the pair already existed.
    async fn insert_unique(&self, entry: PortfolioEntry) -> Result<bool, CoreError>;

    /// Delete the entry for `(user_id, stock_id)`.
    /// Returns `true` if an entry was deleted, `false` if none matched.
    async fn delete(&self, user_id: &str, stock_id: Uuid) -> Result<bool, CoreError>;
}
