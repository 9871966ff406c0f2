use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::GasPriceCache;

/// Handle to the background task that keeps a [`GasPriceCache`] fresh.
///
/// The task runs until [`shutdown`](Self::shutdown) is called or the handle is dropped.
pub struct GasPriceRefresher {
    /// Signals the task to stop
    shutdown: watch::Sender<bool>,
    /// The spawned task
    handle: JoinHandle<()>,
}

impl GasPriceRefresher {
    /// Preloads the cache with one refresh, then spawns a task refreshing it
    /// every `period`.
    ///
    /// A failed preload is logged and does not prevent the task from starting.
    pub async fn start(cache: Arc<GasPriceCache>, period: Duration) -> Self {
        log::info!("gas::refresher: Preloading gas price cache");
        cache.refresh().await;
        Self::spawn(cache, period)
    }

    /// Spawns the refresh task without preloading. The first refresh happens
    /// one `period` from now.
    #[must_use]
    pub fn spawn(cache: Arc<GasPriceCache>, period: Duration) -> Self {
        let (shutdown, mut stop) = watch::channel(false);

        let handle = tokio::spawn(async move {
            log::info!("gas::refresher: Refreshing gas price every {period:?}");
            let mut ticker = interval_at(Instant::now() + period, period);
            // a slow node delays the schedule instead of causing a burst
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        cache.refresh().await;
                    }
                    _ = stop.changed() => break,
                }
            }
            log::info!("gas::refresher: Stopped");
        });

        Self { shutdown, handle }
    }

    /// Stops the task after any in-flight refresh and waits for it to exit.
    pub async fn shutdown(self) {
        // the task may already be gone, in which case there is nobody to notify
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            log::error!("gas::refresher: Refresh task failed: {e}");
        }
    }
}
