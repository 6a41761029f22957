use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::entry::PortfolioEntry;
use crate::models::stock::StockRecord;
use crate::storage::traits::{CatalogStore, MembershipStore};

/// The user ↔ stock membership relation. Sole writer of
/// `PortfolioEntry`; enforces at-most-one entry per (user, symbol).
///
/// Entries carry foreign keys only, so every read joins back to the
/// catalog explicitly. A join that fails — an entry pointing at a stock
/// the catalog does not know, or two entries matching one symbol — is
/// an invariant violation and is reported, never papered over.
pub struct PortfolioMembership {
    catalog: Arc<dyn CatalogStore>,
    store: Arc<dyn MembershipStore>,
}

impl PortfolioMembership {
    pub fn new(catalog: Arc<dyn CatalogStore>, store: Arc<dyn MembershipStore>) -> Self {
        Self { catalog, store }
    }

    /// All stocks the user currently holds, in insertion order.
    pub async fn list(&self, user_id: &str) -> Result<Vec<StockRecord>, CoreError> {
        let entries = self.store.entries_for_user(user_id).await?;
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            records.push(self.record_for(&entry).await?);
        }
        Ok(records)
    }

    /// Whether the user holds the given symbol (case-insensitive).
    pub async fn holds(&self, user_id: &str, symbol: &str) -> Result<bool, CoreError> {
        Ok(!self.matching_entries(user_id, symbol).await?.is_empty())
    }

    /// Record the user as holding `stock_id`.
    ///
    /// The store's `insert_unique` is the authoritative guard: under
    /// concurrent adds of the same pair, exactly one caller wins and
    /// the rest get `AlreadyMember`.
    pub async fn add(&self, user_id: &str, stock_id: Uuid) -> Result<(), CoreError> {
        let record = self.catalog.get_by_id(stock_id).await?.ok_or_else(|| {
            CoreError::ValidationError(format!("Stock {stock_id} is not in the catalog"))
        })?;

        let inserted = self
            .store
            .insert_unique(PortfolioEntry::new(user_id, stock_id))
            .await?;
        if !inserted {
            return Err(CoreError::AlreadyMember {
                symbol: record.symbol,
            });
        }
        debug!(user = user_id, symbol = %record.symbol, "added portfolio entry");
        Ok(())
    }

    /// Remove the user's holding of `symbol` (case-insensitive).
    ///
    /// Because (user, symbol) admits at most one entry, removal is
    /// unambiguous. Zero matches is `NotMember`; more than one means
    /// the store is already corrupt, and the operation refuses to guess
    /// which entry to delete.
    pub async fn remove(&self, user_id: &str, symbol: &str) -> Result<(), CoreError> {
        let canonical = StockRecord::canonical_symbol(symbol);
        let matches = self.matching_entries(user_id, &canonical).await?;

        match matches.as_slice() {
            [] => Err(CoreError::NotMember { symbol: canonical }),
            [entry] => {
                let deleted = self.store.delete(user_id, entry.stock_id).await?;
                if !deleted {
                    // Raced with a concurrent removal of the same entry.
                    return Err(CoreError::NotMember { symbol: canonical });
                }
                debug!(user = user_id, symbol = %canonical, "removed portfolio entry");
                Ok(())
            }
            many => {
                error!(
                    user = user_id,
                    symbol = %canonical,
                    count = many.len(),
                    "duplicate membership entries found during removal"
                );
                Err(CoreError::InvariantViolation(format!(
                    "Found {} membership entries for ({user_id}, {canonical}); expected at most one",
                    many.len()
                )))
            }
        }
    }

    /// Entries of the user whose joined record matches `symbol`.
    async fn matching_entries(
        &self,
        user_id: &str,
        symbol: &str,
    ) -> Result<Vec<PortfolioEntry>, CoreError> {
        let entries = self.store.entries_for_user(user_id).await?;
        let mut matches = Vec::new();
        for entry in entries {
            if self.record_for(&entry).await?.matches_symbol(symbol) {
                matches.push(entry);
            }
        }
        Ok(matches)
    }

    /// Join an entry back to its catalog record.
    async fn record_for(&self, entry: &PortfolioEntry) -> Result<StockRecord, CoreError> {
        self.catalog.get_by_id(entry.stock_id).await?.ok_or_else(|| {
            error!(
                user = %entry.user_id,
                stock_id = %entry.stock_id,
                "portfolio entry references a stock missing from the catalog"
            );
            CoreError::InvariantViolation(format!(
                "Portfolio entry for user {} references unknown stock {}",
                entry.user_id, entry.stock_id
            ))
        })
    }
}
