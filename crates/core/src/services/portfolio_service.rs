use tracing::info;

use super::portfolio_membership::PortfolioMembership;
use super::stock_catalog::StockCatalog;
use crate::errors::CoreError;
use crate::models::stock::StockRecord;

/// Longest ticker symbol accepted (NYSE/NASDAQ tickers top out well
/// below this; the slack covers class suffixes like "BRK.B").
const MAX_SYMBOL_LEN: usize = 10;

/// Orchestrates the three user-facing portfolio operations over the
/// catalog and the membership relation. Holds no per-call state; the
/// caller supplies the authenticated user id explicitly on every call —
/// this service never reads ambient identity.
pub struct PortfolioService {
    catalog: StockCatalog,
    membership: PortfolioMembership,
}

impl PortfolioService {
    pub fn new(catalog: StockCatalog, membership: PortfolioMembership) -> Self {
        Self {
            catalog,
            membership,
        }
    }

    /// All stocks the user holds. An empty portfolio is an empty Vec,
    /// not an error.
    pub async fn get_user_portfolio(&self, user_id: &str) -> Result<Vec<StockRecord>, CoreError> {
        validate_user_id(user_id)?;
        self.membership.list(user_id).await
    }

    /// Add a stock to the user's portfolio, importing it into the
    /// catalog from the quote provider if it isn't known yet.
    ///
    /// Returns the resolved record once the entry is durably recorded.
    /// A symbol the provider has never heard of is `StockNotFound`; a
    /// provider outage is `ProviderUnavailable` — the two are never
    /// conflated, so callers can retry the latter.
    pub async fn add_to_portfolio(
        &self,
        user_id: &str,
        symbol: &str,
    ) -> Result<StockRecord, CoreError> {
        validate_user_id(user_id)?;
        let canonical = validate_symbol(symbol)?;

        let record = self
            .catalog
            .resolve(&canonical)
            .await?
            .ok_or_else(|| CoreError::StockNotFound(canonical.clone()))?;

        // Membership precheck: gives the caller a precise reason before
        // any write is attempted. The store's uniqueness guard below is
        // what actually holds under concurrent adds.
        if self.membership.holds(user_id, &record.symbol).await? {
            return Err(CoreError::AlreadyMember {
                symbol: record.symbol,
            });
        }

        self.membership.add(user_id, record.id).await?;
        info!(user = user_id, symbol = %record.symbol, "stock added to portfolio");
        Ok(record)
    }

    /// Remove a stock from the user's portfolio. Symbol matching is
    /// case-insensitive; a symbol the user does not hold is `NotMember`.
    pub async fn remove_from_portfolio(
        &self,
        user_id: &str,
        symbol: &str,
    ) -> Result<(), CoreError> {
        validate_user_id(user_id)?;
        let canonical = validate_symbol(symbol)?;

        self.membership.remove(user_id, &canonical).await?;
        info!(user = user_id, symbol = %canonical, "stock removed from portfolio");
        Ok(())
    }
}

/// The user id is opaque (owned by the identity subsystem) but must at
/// least be present.
fn validate_user_id(user_id: &str) -> Result<(), CoreError> {
    if user_id.trim().is_empty() {
        return Err(CoreError::ValidationError("User id must not be empty".into()));
    }
    Ok(())
}

/// Shape-check a raw symbol and return its canonical form.
fn validate_symbol(symbol: &str) -> Result<String, CoreError> {
    let canonical = StockRecord::canonical_symbol(symbol);
    if canonical.is_empty() {
        return Err(CoreError::ValidationError("Symbol must not be empty".into()));
    }
    if canonical.len() > MAX_SYMBOL_LEN {
        return Err(CoreError::ValidationError(format!(
            "Symbol {canonical} is too long (max {MAX_SYMBOL_LEN} characters)"
        )));
    }
    if !canonical
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(CoreError::ValidationError(format!(
            "Symbol {canonical} contains invalid characters"
        )));
    }
    Ok(canonical)
}
