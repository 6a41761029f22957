use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::stock::StockQuote;

/// Trait abstraction for external stock-data providers.
///
/// The catalog consults a provider only on a local miss. Implementations
/// must keep the two failure modes apart: a symbol that does not exist
/// is `Ok(None)`, while a provider that cannot answer (network error,
/// timeout, quota) is `Err(ProviderUnavailable)`. Conflating the two
/// would make the service report "stock does not exist" during an
/// outage, which is wrong.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Look up a stock by ticker symbol.
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<StockQuote>, CoreError>;
}
