//! Live feed engine for the NZ Health Event Bus dashboard.
//!
//! Mounts the synthetic event feed with a terminal view of the event rail
//! and runs until interrupted or until the configured run bounds are hit.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `nzheb-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the template catalog (rejects an empty or malformed catalog)
//! 4. Open the audit trail, if enabled
//! 5. Mount the live feed
//! 6. Wait for Ctrl-C or a run bound
//! 7. Unmount and log the summary

mod error;
mod render;

use std::path::Path;
use std::time::Duration;

use nzheb_core::audit::AuditTrail;
use nzheb_core::config::{DashboardConfig, LoggingConfig, RunBoundsConfig};
use nzheb_core::feed::LiveFeed;
use nzheb_core::synth::EventSynthesizer;
use tokio::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::render::TerminalView;

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "nzheb-config.yaml";

/// How often run bounds are checked.
const BOUNDS_POLL: Duration = Duration::from_millis(250);

/// Why the engine stopped the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownReason {
    /// Ctrl-C or SIGINT.
    Interrupted,
    /// `run.max_ticks` events were synthesized.
    MaxTicksReached,
    /// `run.max_real_time_seconds` elapsed.
    MaxRealTimeReached,
}

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any startup step fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("nzheb-engine starting");
    info!(
        tick_interval_ms = config.feed.tick_interval_ms,
        log_capacity = config.feed.log_capacity,
        seed_events = config.feed.seed_events,
        rng_seed = config.feed.rng_seed,
        "Configuration loaded"
    );

    // 3. Build the catalog.
    let catalog = config.template_catalog()?;
    info!(
        templates = catalog.len(),
        custom = !config.catalog.is_empty(),
        "Template catalog ready"
    );

    // 4. Open the audit trail.
    let audit = if config.audit.enabled {
        let trail = AuditTrail::open(&config.audit.path)?;
        info!(path = %config.audit.path.display(), "Audit trail enabled");
        Some(trail)
    } else {
        None
    };

    // 5. Mount the feed.
    let synth = EventSynthesizer::from_seed_option(catalog, config.feed.rng_seed);
    let feed = LiveFeed::mount(&config.feed, synth, TerminalView::new(), audit)?;

    // 6. Run until interrupted or bounded.
    let reason = wait_for_shutdown(&feed, &config.run).await;
    info!(reason = ?reason, "Stopping live feed");

    // 7. Unmount and report.
    let final_rows = feed.snapshot();
    let summary = feed.unmount();
    for line in render::severity_bars(&final_rows, 30) {
        info!("{line}");
    }
    info!(
        ticks = summary.ticks,
        retained = summary.retained,
        evicted = summary.evicted,
        "nzheb-engine shutdown complete"
    );

    Ok(())
}

/// Load `nzheb-config.yaml` from the working directory, or defaults.
fn load_config() -> Result<DashboardConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok(DashboardConfig::from_file(config_path)?)
    } else {
        // Logging is not up yet; the default config still honours env
        // overrides.
        Ok(DashboardConfig::parse("")?)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}

/// Block until Ctrl-C or a run bound is reached.
async fn wait_for_shutdown(feed: &LiveFeed, bounds: &RunBoundsConfig) -> ShutdownReason {
    let started = Instant::now();
    let mut poll = tokio::time::interval(BOUNDS_POLL);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    warn!(error = %e, "Failed to listen for Ctrl-C; stopping");
                }
                return ShutdownReason::Interrupted;
            }
            _ = poll.tick() => {
                if let Some(reason) = bound_reached(bounds, feed.ticks(), started.elapsed()) {
                    return reason;
                }
            }
        }
    }
}

/// The run bound that has been hit, if any. Zero bounds are unlimited.
fn bound_reached(bounds: &RunBoundsConfig, ticks: u64, elapsed: Duration) -> Option<ShutdownReason> {
    if bounds.max_ticks > 0 && ticks >= bounds.max_ticks {
        return Some(ShutdownReason::MaxTicksReached);
    }
    if bounds.max_real_time_seconds > 0 && elapsed.as_secs() >= bounds.max_real_time_seconds {
        return Some(ShutdownReason::MaxRealTimeReached);
    }
    None
}
