use super::ingestion::RawAssetRecord;
use serde::{Deserialize, Serialize};

/// One asset row under the canonical schema.
///
/// Provider field names are renamed to the fixed names used by every
/// downstream consumer, and every value is concrete: numeric fields default
/// to 0 and text fields to the empty string when the provider omitted them
/// or sent null.
///
/// # Fields
/// * `coin_id`: canonical asset identifier (provider `id`)
/// * `symbol`: ticker symbol
/// * `name`: display name
/// * `price_usd`: current price (provider `current_price`)
/// * `market_cap`: market capitalization
/// * `volume_24h`: 24-hour trading volume (provider `total_volume`)
/// * `pct_change_24h`: 24-hour price change, percent
/// * `pct_change_7d`: 7-day price change, percent
/// * `pct_change_1h`: 1-hour price change, percent (pass-through)
/// * `market_cap_rank`: provider ranking (pass-through)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub coin_id: String,
    pub symbol: String,
    pub name: String,
    pub price_usd: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub pct_change_24h: f64,
    pub pct_change_7d: f64,
    pub pct_change_1h: f64,
    pub market_cap_rank: u32,
}

impl From<RawAssetRecord> for NormalizedRecord {
    fn from(raw: RawAssetRecord) -> Self {
        Self {
            coin_id: raw.id,
            symbol: raw.symbol,
            name: raw.name,
            price_usd: raw.current_price.unwrap_or(0.0),
            market_cap: raw.market_cap.unwrap_or(0.0),
            volume_24h: raw.total_volume.unwrap_or(0.0),
            pct_change_24h: raw.price_change_percentage_24h.unwrap_or(0.0),
            pct_change_7d: raw.price_change_percentage_7d_in_currency.unwrap_or(0.0),
            pct_change_1h: raw.price_change_percentage_1h_in_currency.unwrap_or(0.0),
            market_cap_rank: raw.market_cap_rank.unwrap_or(0),
        }
    }
}

/// Maps raw provider rows to the canonical schema.
///
/// Purely a function of its input: no I/O, no clock access. Row order is
/// preserved. Missing or null values are not an error; they become the
/// typed default so minor upstream schema drift never stops the pipeline.
pub fn normalize(rows: Vec<RawAssetRecord>) -> Vec<NormalizedRecord> {
    rows.into_iter().map(NormalizedRecord::from).collect()
}
