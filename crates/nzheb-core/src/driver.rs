//! Cancellable repeating task that paces the live feed.
//!
//! [`PeriodicDriver::start`] spawns a tokio task that fires a callback once
//! per interval, the first firing one full interval after start. The
//! returned [`DriverHandle`] is the only way to stop it:
//!
//! - [`DriverHandle::stop`] consumes the handle, so a driver is stopped at
//!   most once by its owner.
//! - Stopping is synchronous. A gate mutex is held for the whole of each
//!   firing; `stop` flips the gate under that mutex, so once it returns no
//!   firing is in progress and none will start.
//! - Dropping a running handle stops the driver too. A timer never outlives
//!   the view that owns it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Errors raised when starting a driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A zero period would spin.
    #[error("driver interval must be non-zero")]
    ZeroInterval,

    /// `start` was called outside a tokio runtime.
    #[error("driver must be started from within a tokio runtime")]
    NoRuntime,
}

/// Lifecycle state of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Firing once per interval.
    Running,
    /// Stopped for good; will not fire again.
    Stopped,
}

/// Fires a callback at a fixed cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicDriver {
    interval: Duration,
}

impl PeriodicDriver {
    /// Create a driver with the given period.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::ZeroInterval`] if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self, DriverError> {
        if interval.is_zero() {
            return Err(DriverError::ZeroInterval);
        }
        Ok(Self { interval })
    }

    /// The firing period.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the repeating task. `on_fire` receives the 1-based firing count.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoRuntime`] when called outside a tokio
    /// runtime.
    pub fn start<F>(&self, mut on_fire: F) -> Result<DriverHandle, DriverError>
    where
        F: FnMut(u64) + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_err| DriverError::NoRuntime)?;

        let gate = Arc::new(Mutex::new(Gate {
            state: DriverState::Running,
            fired: 0,
        }));
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let period = self.interval;
        let task_gate = Arc::clone(&gate);

        let task = runtime.spawn(async move {
            let start = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {
                        let mut gate = lock(&task_gate);
                        if gate.state == DriverState::Stopped {
                            break;
                        }
                        gate.fired = gate.fired.saturating_add(1);
                        on_fire(gate.fired);
                    }
                }
            }
            debug!("Periodic driver task exited");
        });

        debug!(
            interval_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
            "Periodic driver started"
        );

        Ok(DriverHandle {
            gate,
            stop_tx,
            task: Some(task),
        })
    }
}

#[derive(Debug)]
struct Gate {
    state: DriverState,
    fired: u64,
}

/// Owner's handle on a running driver.
#[derive(Debug)]
pub struct DriverHandle {
    gate: Arc<Mutex<Gate>>,
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl DriverHandle {
    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        lock(&self.gate).state
    }

    /// Number of times the callback has fired.
    pub fn fired(&self) -> u64 {
        lock(&self.gate).fired
    }

    /// Stop the driver. Returns the total number of firings.
    ///
    /// No firing happens after this returns.
    pub fn stop(mut self) -> u64 {
        self.halt()
    }

    fn halt(&mut self) -> u64 {
        let fired = {
            let mut gate = lock(&self.gate);
            gate.state = DriverState::Stopped;
            gate.fired
        };
        // The receiver may already be gone if the task exited on its own.
        let _ = self.stop_tx.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        debug!(fired, "Periodic driver stopped");
        fired
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            warn!("Driver handle dropped while running; stopping it");
            let _ = self.halt();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    const PERIOD: Duration = Duration::from_millis(1500);

    fn counting_start(driver: &PeriodicDriver) -> (DriverHandle, Arc<AtomicU64>) {
        let count = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&count);
        let handle = driver
            .start(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        (handle, count)
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(matches!(
            PeriodicDriver::new(Duration::ZERO),
            Err(DriverError::ZeroInterval)
        ));
    }

    #[test]
    fn start_outside_runtime_fails() {
        let driver = PeriodicDriver::new(PERIOD).unwrap();
        assert!(matches!(driver.start(|_| {}), Err(DriverError::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_fire_before_first_interval() {
        let driver = PeriodicDriver::new(PERIOD).unwrap();
        let (handle, count) = counting_start(&driver);
        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(handle.state(), DriverState::Running);
        let _ = handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_interval_until_stopped() {
        let driver = PeriodicDriver::new(PERIOD).unwrap();
        let (handle, count) = counting_start(&driver);

        tokio::time::sleep(PERIOD * 3 + Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(handle.fired(), 3);

        assert_eq!(handle.stop(), 3);
        tokio::time::sleep(PERIOD * 10).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn firing_count_is_passed_to_callback() {
        let driver = PeriodicDriver::new(PERIOD).unwrap();
        let last = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&last);
        let handle = driver
            .start(move |n| {
                seen.store(n, Ordering::SeqCst);
            })
            .unwrap();
        tokio::time::sleep(PERIOD * 2 + Duration::from_millis(100)).await;
        assert_eq!(last.load(Ordering::SeqCst), 2);
        let _ = handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_driver() {
        let driver = PeriodicDriver::new(PERIOD).unwrap();
        let (handle, count) = counting_start(&driver);
        tokio::time::sleep(PERIOD + Duration::from_millis(100)).await;
        drop(handle);
        tokio::time::sleep(PERIOD * 5).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
