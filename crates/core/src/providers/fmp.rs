use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::QuoteProvider;
use crate::errors::{redact_query, CoreError};
use crate::models::stock::StockQuote;

const BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Financial Modeling Prep (FMP) provider for stock profile data.
///
/// - **Requires**: API key (free tier is fine for profile lookups).
/// - **Endpoint**: `/profile/{symbol}` — returns a JSON array with at
///   most one profile object, or an empty array for unknown symbols.
/// - **Quirk**: errors (bad key, quota) come back as a 200 with an
///   `{"Error Message": ...}` object instead of an array.
///
/// The API key travels in the query string, so every error path runs
/// through `redact_query` before the message leaves this module.
pub struct FmpProvider {
    client: Client,
    api_key: String,
}

impl FmpProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, api_key }
    }

    fn unavailable(&self, message: String) -> CoreError {
        CoreError::ProviderUnavailable {
            provider: self.name().to_string(),
            message,
        }
    }

    /// Parse the body of a `/profile/{symbol}` response.
    ///
    /// `Ok(None)` for the empty-array "no such symbol" answer,
    /// `Err(ProviderUnavailable)` for the error-object answer or
    /// anything that is not valid profile JSON.
    pub fn parse_profile_response(&self, body: &str) -> Result<Option<StockQuote>, CoreError> {
        if let Ok(err) = serde_json::from_str::<FmpErrorResponse>(body) {
            return Err(self.unavailable(err.error_message));
        }

        let profiles: Vec<FmpProfile> = serde_json::from_str(body)
            .map_err(|e| self.unavailable(format!("Unexpected profile payload: {e}")))?;

        Ok(profiles.into_iter().next().map(|p| StockQuote {
            symbol: p.symbol,
            company_name: p.company_name,
            industry: p.industry.unwrap_or_default(),
            market_cap: p.mkt_cap.max(0.0) as u64,
        }))
    }
}

// ── FMP API response types ──────────────────────────────────────────

#[derive(Deserialize)]
struct FmpProfile {
    symbol: String,
    #[serde(rename = "companyName", default)]
    company_name: String,
    #[serde(default)]
    industry: Option<String>,
    #[serde(rename = "mktCap", default)]
    mkt_cap: f64,
}

#[derive(Deserialize)]
struct FmpErrorResponse {
    #[serde(rename = "Error Message")]
    error_message: String,
}

#[async_trait]
impl QuoteProvider for FmpProvider {
    fn name(&self) -> &str {
        "Financial Modeling Prep"
    }

    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<StockQuote>, CoreError> {
        let url = format!("{BASE_URL}/profile/{}", symbol.trim().to_ascii_uppercase());

        let body = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| self.unavailable(redact_query(&e.to_string())))?
            .error_for_status()
            .map_err(|e| self.unavailable(redact_query(&e.to_string())))?
            .text()
            .await
            .map_err(|e| self.unavailable(redact_query(&e.to_string())))?;

        self.parse_profile_response(&body)
    }
}
