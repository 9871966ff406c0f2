//! # Gas Module
//!
//! Keeps the most recent network gas price in memory. A background task
//! ([`GasPriceRefresher`]) refreshes it on a fixed period and [`GasPriceCache::read`]
//! refreshes inline when the sample it finds is older than the staleness threshold.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::chain::ChainReader;

/// Background refresh task
pub mod refresher;

pub use refresher::GasPriceRefresher;

/// Default period of the background refresh, and default staleness threshold
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Timing of the gas price cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasCacheSettings {
    /// How often the background task refreshes
    pub refresh_interval: Duration,
    /// Maximum age of a sample before `read` refreshes inline
    pub staleness_threshold: Duration,
}

impl Default for GasCacheSettings {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            staleness_threshold: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

/// One gas price observation.
///
/// Price and capture time are only ever stored and replaced together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPriceSample {
    /// Gas price in wei
    pub price: u128,
    /// Monotonic capture time, used for staleness
    pub fetched_at: Instant,
    /// Wall clock capture time, for logs and display
    pub captured_at: DateTime<Utc>,
}

impl GasPriceSample {
    /// Age of the sample
    #[must_use]
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }
}

/// In-memory gas price cache holding at most one live sample.
pub struct GasPriceCache {
    /// Node access
    reader: Arc<dyn ChainReader>,
    /// Maximum age served without an inline refresh
    staleness_threshold: Duration,
    /// The live sample, empty until the first successful refresh
    sample: RwLock<Option<GasPriceSample>>,
}

impl GasPriceCache {
    /// Creates an empty cache.
    pub fn new(reader: Arc<dyn ChainReader>, staleness_threshold: Duration) -> Self {
        Self {
            reader,
            staleness_threshold,
            sample: RwLock::new(None),
        }
    }

    /// The staleness threshold this cache was built with
    #[must_use]
    pub const fn staleness_threshold(&self) -> Duration {
        self.staleness_threshold
    }

    /// Fetches the current gas price and replaces the live sample with it.
    ///
    /// Failures are logged and swallowed: the previous sample, if any, stays
    /// live. Concurrent refreshes are allowed and the last one to finish wins.
    ///
    /// # Returns
    /// The new sample, or `None` if the fetch failed
    pub async fn refresh(&self) -> Option<GasPriceSample> {
        match self.reader.get_gas_price().await {
            Ok(price) => {
                let sample = GasPriceSample {
                    price,
                    fetched_at: Instant::now(),
                    captured_at: Utc::now(),
                };
                *self.sample.write().await = Some(sample);
                log::info!(
                    "gas::refresh: Cache was updated. timestamp: {} ({})",
                    sample.captured_at.timestamp_millis(),
                    sample.captured_at.to_rfc3339()
                );
                Some(sample)
            }
            Err(e) => {
                log::error!("gas::refresh: Failed to fetch gas price: {e}");
                None
            }
        }
    }

    /// The live sample, whatever its age.
    pub async fn sample(&self) -> Option<GasPriceSample> {
        *self.sample.read().await
    }

    /// The current gas price in wei.
    ///
    /// A missing sample, or one older than the staleness threshold, triggers
    /// one inline [`refresh`](Self::refresh) before answering. A failed
    /// refresh falls back to the previous sample.
    ///
    /// # Returns
    /// `None` only if no refresh has ever succeeded
    pub async fn read(&self) -> Option<u128> {
        let needs_refresh = self
            .sample()
            .await
            .is_none_or(|sample| sample.age() > self.staleness_threshold);

        if needs_refresh {
            if let Some(sample) = self.refresh().await {
                return Some(sample.price);
            }
        }
        self.sample().await.map(|sample| sample.price)
    }

    /// [`read`](Self::read), formatted as a base-10 string.
    pub async fn read_gas_price(&self) -> Option<String> {
        self.read().await.map(|price| price.to_string())
    }
}
