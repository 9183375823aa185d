use crate::errors::{PipelineError, PipelineResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;

/// CoinGecko markets listing endpoint
const MARKETS_URL: &str = "https://api.coingecko.com/api/v3/coins/markets";

/// Number of assets fetched per snapshot (one full page, market-cap descending)
const PAGE_SIZE: u32 = 100;

/// One asset row as returned by the market-data provider.
///
/// Field names match the provider's wire format so the same type deserializes
/// both the JSON listing and the raw CSV snapshots written from it. Every
/// field is optional or defaulted: the provider occasionally omits columns or
/// returns explicit nulls, and a snapshot must still load.
///
/// # Fields
/// * `id`: provider asset identifier (e.g. "bitcoin")
/// * `symbol`: ticker symbol (e.g. "btc")
/// * `name`: display name
/// * `market_cap_rank`: position in the market-cap ordering
/// * `current_price`: latest price in the quote currency
/// * `market_cap`: market capitalization
/// * `total_volume`: 24-hour trading volume
/// * `price_change_percentage_1h_in_currency`: 1-hour price change, percent
/// * `price_change_percentage_24h`: 24-hour price change, percent
/// * `price_change_percentage_7d_in_currency`: 7-day price change, percent
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RawAssetRecord {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub market_cap_rank: Option<u32>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_1h_in_currency: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub price_change_percentage_7d_in_currency: Option<f64>,
}

/// A source of market listings, abstracted so the extract stage can be
/// exercised in tests without touching the network.
#[async_trait]
pub trait MarketDataSource {
    /// Fetch the top assets by market capitalization, most valuable first.
    async fn fetch_top_markets(&self) -> PipelineResult<Vec<RawAssetRecord>>;
}

/// Client for the CoinGecko markets API.
///
/// Fetches one page of the top assets by market capitalization. The public
/// API needs no credentials; when a `COINGECKO_API_KEY` environment variable
/// is set it is forwarded as the demo-key header for the higher rate limit.
pub struct CoinGeckoClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl CoinGeckoClient {
    /// Creates a new client, picking up an optional API key from the
    /// environment.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: env::var("COINGECKO_API_KEY").ok(),
            base_url: MARKETS_URL.to_string(),
        }
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    /// Fetches the top 100 assets with 1h/24h/7d percentage-change windows.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the request fails at the transport level
    /// - the provider answers with a non-success HTTP status
    /// - the body is error-shaped or does not decode as a listing
    async fn fetch_top_markets(&self) -> PipelineResult<Vec<RawAssetRecord>> {
        let per_page = PAGE_SIZE.to_string();
        let mut request = self.client.get(&self.base_url).query(&[
            ("vs_currency", "usd"),
            ("order", "market_cap_desc"),
            ("per_page", per_page.as_str()),
            ("page", "1"),
            ("price_change_percentage", "1h,24h,7d"),
        ]);

        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::UpstreamFetch { status });
        }

        let payload = response.json::<Value>().await?;
        parse_markets_payload(payload)
    }
}

/// Decodes a markets-listing payload into typed rows.
///
/// The provider reports some failures inside a 2xx body as an object with an
/// embedded status block, so the payload is checked for that shape before
/// the listing itself is decoded.
pub fn parse_markets_payload(payload: Value) -> PipelineResult<Vec<RawAssetRecord>> {
    if let Some(status) = payload.get("status") {
        let message = status
            .get("error_message")
            .and_then(Value::as_str)
            .unwrap_or("unknown provider error")
            .to_string();
        return Err(PipelineError::UpstreamPayload { message });
    }

    if !payload.is_array() {
        return Err(PipelineError::UpstreamPayload {
            message: "expected a listing array".to_string(),
        });
    }

    serde_json::from_value(payload).map_err(|e| PipelineError::UpstreamPayload {
        message: e.to_string(),
    })
}
