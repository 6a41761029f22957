use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Size bracket of a company by market capitalization.
/// Derived from the raw dollar figure the provider reports;
/// only the bracket is kept on the catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketCapClass {
    /// Below $300M
    Micro,
    /// $300M – $2B
    Small,
    /// $2B – $10B
    Mid,
    /// $10B – $200B
    Large,
    /// $200B and above
    Mega,
}

impl MarketCapClass {
    /// Classify a raw market cap (in dollars).
    #[must_use]
    pub fn from_market_cap(cap: u64) -> Self {
        match cap {
            c if c >= 200_000_000_000 => MarketCapClass::Mega,
            c if c >= 10_000_000_000 => MarketCapClass::Large,
            c if c >= 2_000_000_000 => MarketCapClass::Mid,
            c if c >= 300_000_000 => MarketCapClass::Small,
            _ => MarketCapClass::Micro,
        }
    }
}

impl std::fmt::Display for MarketCapClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketCapClass::Micro => write!(f, "Micro"),
            MarketCapClass::Small => write!(f, "Small"),
            MarketCapClass::Mid => write!(f, "Mid"),
            MarketCapClass::Large => write!(f, "Large"),
            MarketCapClass::Mega => write!(f, "Mega"),
        }
    }
}

/// A stock as described by an external quote provider.
///
/// No surrogate id yet — that is assigned when the catalog imports
/// the quote into a `StockRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockQuote {
    /// Ticker symbol as reported by the provider (any case)
    pub symbol: String,

    /// Company name (e.g., "Apple Inc.")
    pub company_name: String,

    /// Sector/industry label (e.g., "Consumer Electronics")
    pub industry: String,

    /// Raw market capitalization in dollars
    pub market_cap: u64,
}

/// A stock known to the catalog.
///
/// **Identity** is the canonical (uppercase) symbol; `id` is the
/// surrogate key that portfolio entries reference. Records are created
/// by import and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    /// Surrogate identifier, assigned on catalog insert
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Company name
    pub company_name: String,

    /// Sector/industry label
    pub industry: String,

    /// Market-cap bracket
    pub market_cap: MarketCapClass,

    /// When the record entered the catalog
    pub imported_at: DateTime<Utc>,
}

impl PartialEq for StockRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StockRecord {}

impl StockRecord {
    /// Canonical form of a ticker symbol: trimmed and uppercased.
    /// All symbol comparison in this crate goes through this.
    #[must_use]
    pub fn canonical_symbol(raw: &str) -> String {
        raw.trim().to_ascii_uppercase()
    }

    /// Build a catalog record from a provider quote.
    /// Assigns a fresh surrogate id and canonicalizes the symbol.
    #[must_use]
    pub fn from_quote(quote: StockQuote) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: Self::canonical_symbol(&quote.symbol),
            company_name: quote.company_name,
            industry: quote.industry,
            market_cap: MarketCapClass::from_market_cap(quote.market_cap),
            imported_at: Utc::now(),
        }
    }

    /// Case-insensitive symbol comparison against a raw (possibly
    /// uncanonicalized) symbol.
    #[must_use]
    pub fn matches_symbol(&self, raw: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(raw.trim())
    }
}
