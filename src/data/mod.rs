pub mod features;
pub mod ingestion;
pub mod normalize;

pub use features::{enrich, CleanRecord};
pub use ingestion::{CoinGeckoClient, MarketDataSource, RawAssetRecord};
pub use normalize::{normalize, NormalizedRecord};
