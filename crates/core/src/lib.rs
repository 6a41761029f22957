pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use errors::CoreError;
use models::stock::StockRecord;
use providers::traits::QuoteProvider;
use services::portfolio_membership::PortfolioMembership;
use services::portfolio_service::PortfolioService;
use services::stock_catalog::StockCatalog;
use storage::memory::{InMemoryCatalogStore, InMemoryMembershipStore};
use storage::traits::{CatalogStore, MembershipStore};

/// Main entry point for the portfolio-core library.
///
/// Wires the default composition: a quote provider behind the stock
/// catalog, the membership relation on top of shared stores, and the
/// orchestrating service. Identity is explicit — every operation takes
/// the authenticated user id as a parameter.
#[must_use]
pub struct PortfolioTracker {
    service: PortfolioService,
}

impl PortfolioTracker {
    /// Build a tracker on fresh in-memory stores.
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_stores(
            Arc::new(InMemoryCatalogStore::new()),
            Arc::new(InMemoryMembershipStore::new()),
            provider,
        )
    }

    /// Build a tracker on caller-supplied stores (e.g., database-backed
    /// implementations of the storage traits).
    pub fn with_stores(
        catalog_store: Arc<dyn CatalogStore>,
        membership_store: Arc<dyn MembershipStore>,
        provider: Arc<dyn QuoteProvider>,
    ) -> Self {
        let catalog = StockCatalog::new(Arc::clone(&catalog_store), provider);
        let membership = PortfolioMembership::new(catalog_store, membership_store);
        Self {
            service: PortfolioService::new(catalog, membership),
        }
    }

    /// As `with_stores`, with a custom deadline for provider calls.
    pub fn with_provider_timeout(
        catalog_store: Arc<dyn CatalogStore>,
        membership_store: Arc<dyn MembershipStore>,
        provider: Arc<dyn QuoteProvider>,
        timeout: Duration,
    ) -> Self {
        let catalog = StockCatalog::new(Arc::clone(&catalog_store), provider)
            .with_provider_timeout(timeout);
        let membership = PortfolioMembership::new(catalog_store, membership_store);
        Self {
            service: PortfolioService::new(catalog, membership),
        }
    }

    // ── Portfolio operations ────────────────────────────────────────

    /// All stocks the user currently holds.
    pub async fn get_portfolio(&self, user_id: &str) -> Result<Vec<StockRecord>, CoreError> {
        self.service.get_user_portfolio(user_id).await
    }

    /// Add a stock to the user's portfolio by symbol.
    pub async fn add_stock(&self, user_id: &str, symbol: &str) -> Result<StockRecord, CoreError> {
        self.service.add_to_portfolio(user_id, symbol).await
    }

    /// Remove a stock from the user's portfolio by symbol.
    pub async fn remove_stock(&self, user_id: &str, symbol: &str) -> Result<(), CoreError> {
        self.service.remove_from_portfolio(user_id, symbol).await
    }
}
