use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::stock::StockRecord;
use crate::providers::traits::QuoteProvider;
use crate::storage::traits::CatalogStore;

/// Default deadline for a single provider call.
const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// The canonical set of known stocks, keyed by ticker symbol.
///
/// Resolution is local-first: the store is checked before the external
/// provider is consulted, so in the steady state a symbol costs zero
/// provider calls. On a miss the provider is asked exactly once, under
/// a deadline; a hit is imported idempotently (two concurrent imports
/// of the same symbol leave one record, and both callers get it).
pub struct StockCatalog {
    store: Arc<dyn CatalogStore>,
    provider: Arc<dyn QuoteProvider>,
    provider_timeout: Duration,
}

impl StockCatalog {
    pub fn new(store: Arc<dyn CatalogStore>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            store,
            provider,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Override the provider-call deadline.
    #[must_use]
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Resolve a symbol to a catalog record, importing from the
    /// provider on a local miss.
    ///
    /// `Ok(None)` means the symbol does not exist anywhere — the
    /// catalog missed AND the provider reported not-found. No record is
    /// created in that case. Provider failures (including the deadline
    /// expiring) surface as `ProviderUnavailable`, never as `None`.
    pub async fn resolve(&self, symbol: &str) -> Result<Option<StockRecord>, CoreError> {
        let canonical = StockRecord::canonical_symbol(symbol);

        if let Some(record) = self.store.get_by_symbol(&canonical).await? {
            return Ok(Some(record));
        }

        let lookup = self.provider.find_by_symbol(&canonical);
        let quote = match tokio::time::timeout(self.provider_timeout, lookup).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    symbol = %canonical,
                    provider = self.provider.name(),
                    timeout_ms = self.provider_timeout.as_millis() as u64,
                    "quote provider call timed out"
                );
                return Err(CoreError::ProviderUnavailable {
                    provider: self.provider.name().to_string(),
                    message: format!(
                        "No answer for {canonical} within {}ms",
                        self.provider_timeout.as_millis()
                    ),
                });
            }
        };

        let Some(quote) = quote else {
            debug!(symbol = %canonical, provider = self.provider.name(), "symbol unknown to provider");
            return Ok(None);
        };

        // A concurrent resolve may have imported the symbol while we
        // were waiting on the provider; insert_if_absent keeps the
        // first record and hands the survivor back.
        let record = self
            .store
            .insert_if_absent(StockRecord::from_quote(quote))
            .await?;
        debug!(symbol = %record.symbol, id = %record.id, "imported stock into catalog");
        Ok(Some(record))
    }
}
