//! The live feed: a view-owned bundle of synthesizer, log, and driver.
//!
//! Mounting seeds the log, renders it once, and starts the driver. Each
//! firing synthesizes one event, prepends it to the log, renders the new
//! contents, and then writes its audit fan-out. Unmounting stops the driver.
//!
//! The log is shared with the driver task behind a mutex, but only the
//! driver callback writes to it; the owner only reads snapshots.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nzheb_types::EventInstance;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::audit::AuditTrail;
use crate::clock::WallClock;
use crate::config::FeedConfig;
use crate::driver::{DriverError, DriverHandle, DriverState, PeriodicDriver};
use crate::log::{BoundedEventLog, LogError};
use crate::synth::EventSynthesizer;

/// Errors raised while mounting a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The log could not be built.
    #[error("event log error: {source}")]
    Log {
        /// The underlying log error.
        #[from]
        source: LogError,
    },

    /// The driver could not be started.
    #[error("driver error: {source}")]
    Driver {
        /// The underlying driver error.
        #[from]
        source: DriverError,
    },
}

/// Renders the log after every update.
///
/// Called from the driver task with the log's contents, newest first.
pub trait FeedView: Send {
    /// Draw the current contents of the log.
    fn render(&mut self, events: &[EventInstance]);
}

/// A view that draws nothing, for headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpView;

impl FeedView for NoOpView {
    fn render(&mut self, _events: &[EventInstance]) {}
}

/// Totals reported when a feed is unmounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSummary {
    /// Events synthesized by the driver (seeded events excluded).
    pub ticks: u64,
    /// Events still in the log.
    pub retained: usize,
    /// Events evicted from the tail.
    pub evicted: u64,
}

/// A mounted live feed.
#[derive(Debug)]
pub struct LiveFeed {
    log: Arc<Mutex<BoundedEventLog>>,
    driver: DriverHandle,
}

impl LiveFeed {
    /// Seed the log, render it once, and start the driver.
    ///
    /// Audit failures during a tick are logged and skipped; they never stop
    /// the feed.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] if the log capacity or tick interval is zero, or
    /// if called outside a tokio runtime.
    pub fn mount<R, C, V>(
        config: &FeedConfig,
        mut synth: EventSynthesizer<R, C>,
        mut view: V,
        mut audit: Option<AuditTrail>,
    ) -> Result<Self, FeedError>
    where
        R: Rng + Send + 'static,
        C: WallClock + 'static,
        V: FeedView + 'static,
    {
        let driver = PeriodicDriver::new(config.tick_interval())?;

        let mut log = BoundedEventLog::new(config.log_capacity)?;
        log.seed(synth.seed_events(config.seed_events));
        view.render(log.as_slice());

        info!(
            capacity = log.capacity(),
            seeded = log.len(),
            templates = synth.catalog().len(),
            tick_interval_ms = config.tick_interval_ms,
            audit = audit.is_some(),
            "Live feed mounted"
        );

        let log = Arc::new(Mutex::new(log));
        let shared = Arc::clone(&log);

        let driver = driver.start(move |tick| {
            let event = synth.synthesize();
            debug!(
                tick,
                event_id = %event.id,
                event_type = event.event_type(),
                severity = %event.template.severity,
                "Event synthesized"
            );

            {
                let mut guard = lock(&shared);
                let _ = guard.append(event.clone());
                view.render(guard.as_slice());
            }

            // Written outside the log lock so readers never wait on the sink.
            if let Some(trail) = audit.as_mut() {
                if let Err(e) = trail.record_fanout(&event) {
                    warn!(error = %e, event_id = %event.id, "Audit write failed; continuing");
                }
            }
        })?;

        Ok(Self { log, driver })
    }

    /// Copy of the log contents, newest first.
    pub fn snapshot(&self) -> Vec<EventInstance> {
        lock(&self.log).snapshot()
    }

    /// Driver lifecycle state.
    pub fn state(&self) -> DriverState {
        self.driver.state()
    }

    /// Events synthesized so far.
    pub fn ticks(&self) -> u64 {
        self.driver.fired()
    }

    /// Stop the driver and report totals. Nothing is appended afterwards.
    pub fn unmount(self) -> FeedSummary {
        let ticks = self.driver.stop();
        let log = lock(&self.log);
        let summary = FeedSummary {
            ticks,
            retained: log.len(),
            evicted: log.evicted_total(),
        };
        info!(
            ticks = summary.ticks,
            retained = summary.retained,
            evicted = summary.evicted,
            "Live feed unmounted"
        );
        summary
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
