use super::normalize::NormalizedRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format of the audit timestamp stamped on every enriched row
const TRANSFORM_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One fully enriched asset row, ready for serialization.
///
/// Extends the canonical schema with derived analytics columns. Field order
/// here is the column order of the clean snapshot file; the pass-through
/// columns come last.
///
/// # Fields
/// * `daily_return`: 24-hour change as a fraction rather than a percentage
/// * `volatility_score`: average of absolute 24h and 7d changes; a simple
///   magnitude proxy, not a statistical volatility estimate
/// * `market_dominance_pct`: this row's share of the snapshot's total market
///   capitalization, in percent
/// * `transform_timestamp`: wall-clock time of the transform run, identical
///   for every row of one snapshot
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CleanRecord {
    pub coin_id: String,
    pub symbol: String,
    pub name: String,
    pub price_usd: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub pct_change_24h: f64,
    pub pct_change_7d: f64,
    pub daily_return: f64,
    pub volatility_score: f64,
    pub market_dominance_pct: f64,
    pub transform_timestamp: String,
    pub pct_change_1h: f64,
    pub market_cap_rank: u32,
}

/// Computes the derived analytics columns over a normalized snapshot.
///
/// All operations are total over the canonical schema, so enrichment cannot
/// fail. The timestamp is captured once by the caller and shared by every
/// row. When the snapshot's total market cap is not positive, dominance is
/// reported as 0 for every row rather than derived from a meaningless
/// denominator.
///
/// # Arguments
/// * `rows`: normalized rows, in snapshot order
/// * `now`: the single wall-clock capture for this transform run
pub fn enrich(rows: Vec<NormalizedRecord>, now: DateTime<Utc>) -> Vec<CleanRecord> {
    let total_market_cap: f64 = rows.iter().map(|r| r.market_cap).sum();
    let stamp = now.format(TRANSFORM_STAMP_FORMAT).to_string();

    rows.into_iter()
        .map(|row| {
            let market_dominance_pct = if total_market_cap > 0.0 {
                row.market_cap / total_market_cap * 100.0
            } else {
                0.0
            };

            CleanRecord {
                daily_return: row.pct_change_24h / 100.0,
                volatility_score: (row.pct_change_24h.abs() + row.pct_change_7d.abs()) / 2.0,
                market_dominance_pct,
                transform_timestamp: stamp.clone(),
                coin_id: row.coin_id,
                symbol: row.symbol,
                name: row.name,
                price_usd: row.price_usd,
                market_cap: row.market_cap,
                volume_24h: row.volume_24h,
                pct_change_24h: row.pct_change_24h,
                pct_change_7d: row.pct_change_7d,
                pct_change_1h: row.pct_change_1h,
                market_cap_rank: row.market_cap_rank,
            }
        })
        .collect()
}
