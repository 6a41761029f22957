// ═══════════════════════════════════════════════════════════════════
// Concurrency Tests — membership uniqueness under racing adds,
// idempotent catalog imports, provider deadline
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use portfolio_core::errors::CoreError;
use portfolio_core::models::stock::StockQuote;
use portfolio_core::providers::traits::QuoteProvider;
use portfolio_core::services::stock_catalog::StockCatalog;
use portfolio_core::storage::memory::{InMemoryCatalogStore, InMemoryMembershipStore};
use portfolio_core::storage::traits::CatalogStore;
use portfolio_core::PortfolioTracker;

/// Counts provider calls; answers every symbol with a canned quote.
struct CountingProvider {
    calls: AtomicUsize,
}

impl CountingProvider {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteProvider for CountingProvider {
    fn name(&self) -> &str {
        "CountingMock"
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<StockQuote>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent resolvers genuinely overlap here.
        tokio::task::yield_now().await;
        Ok(Some(StockQuote {
            symbol: symbol.to_string(),
            company_name: format!("{symbol} Inc."),
            industry: "Testing".into(),
            market_cap: 5_000_000_000,
        }))
    }
}

/// Never answers within any reasonable deadline.
struct SlowProvider;

#[async_trait]
impl QuoteProvider for SlowProvider {
    fn name(&self) -> &str {
        "SlowMock"
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<StockQuote>, CoreError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Some(StockQuote {
            symbol: symbol.to_string(),
            company_name: "Too Late Inc.".into(),
            industry: "Testing".into(),
            market_cap: 0,
        }))
    }
}

// ═══════════════════════════════════════════════════════════════════
// Membership uniqueness under concurrent adds
// ═══════════════════════════════════════════════════════════════════

mod concurrent_add {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_adds_produce_exactly_one_winner() {
        let tracker = Arc::new(PortfolioTracker::new(Arc::new(CountingProvider::new())));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let tracker = Arc::clone(&tracker);
            handles.push(tokio::spawn(async move {
                tracker.add_stock("alice", "AAPL").await
            }));
        }

        let mut created = 0;
        let mut already_member = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(CoreError::AlreadyMember { .. }) => already_member += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(already_member, 9);
        assert_eq!(tracker.get_portfolio("alice").await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_adds_of_different_symbols_all_succeed() {
        let tracker = Arc::new(PortfolioTracker::new(Arc::new(CountingProvider::new())));

        let symbols = ["AAPL", "MSFT", "TSLA", "NVDA", "AMZN"];
        let mut handles = Vec::new();
        for symbol in symbols {
            let tracker = Arc::clone(&tracker);
            handles.push(tokio::spawn(async move {
                tracker.add_stock("alice", symbol).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(tracker.get_portfolio("alice").await.unwrap().len(), 5);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Catalog import idempotency
// ═══════════════════════════════════════════════════════════════════

mod concurrent_resolve {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_resolutions_leave_one_catalog_entry() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let provider = Arc::new(CountingProvider::new());
        let catalog = Arc::new(StockCatalog::new(store.clone(), provider.clone()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let catalog = Arc::clone(&catalog);
            handles.push(tokio::spawn(async move { catalog.resolve("NVDA").await }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            let record = handle.await.unwrap().unwrap().unwrap();
            ids.push(record.id);
        }

        // Every resolver observed the same surviving record.
        assert!(ids.windows(2).all(|w| w[0] == w[1]));

        // Transient double-querying is tolerated, but at most one call
        // per racing resolver and at least one overall.
        let calls = provider.call_count();
        assert!((1..=8).contains(&calls));

        // Steady state: the catalog answers without the provider.
        let before = provider.call_count();
        catalog.resolve("nvda").await.unwrap().unwrap();
        assert_eq!(provider.call_count(), before);

        assert!(store.get_by_symbol("NVDA").await.unwrap().is_some());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Provider deadline
// ═══════════════════════════════════════════════════════════════════

mod provider_deadline {
    use super::*;

    #[tokio::test]
    async fn slow_provider_times_out_as_unavailable() {
        let catalog = StockCatalog::new(
            Arc::new(InMemoryCatalogStore::new()),
            Arc::new(SlowProvider),
        )
        .with_provider_timeout(Duration::from_millis(50));

        let err = catalog.resolve("AAPL").await.unwrap_err();
        assert!(matches!(err, CoreError::ProviderUnavailable { .. }));
    }

    #[tokio::test]
    async fn timeout_through_the_facade() {
        let tracker = PortfolioTracker::with_provider_timeout(
            Arc::new(InMemoryCatalogStore::new()),
            Arc::new(InMemoryMembershipStore::new()),
            Arc::new(SlowProvider),
            Duration::from_millis(50),
        );

        let err = tracker.add_stock("alice", "AAPL").await.unwrap_err();
        assert!(matches!(err, CoreError::ProviderUnavailable { .. }));
        assert!(tracker.get_portfolio("alice").await.unwrap().is_empty());
    }
}
