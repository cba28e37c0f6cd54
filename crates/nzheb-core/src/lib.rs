//! Event synthesizer, bounded event log, and periodic driver for the NZ
//! Health Event Bus live feed.
//!
//! # Modules
//!
//! - [`audit`] -- Publish/deliver/KPI audit trail written as JSON lines.
//! - [`catalog`] -- The non-empty template catalog and the built-in demo set.
//! - [`clock`] -- Wall-clock source and `HH:MM:SS` timestamp formatting.
//! - [`config`] -- Configuration loading from `nzheb-config.yaml`.
//! - [`driver`] -- Cancellable repeating task with a stop-once handle.
//! - [`feed`] -- [`LiveFeed`], which wires synthesizer, log, and driver to
//!   a [`FeedView`].
//! - [`glossary`] -- Hover text for acronyms and event rows.
//! - [`kpi`] -- Chart scaling and KPI arithmetic.
//! - [`log`] -- The bounded, newest-first event log.
//! - [`synth`] -- Random event synthesis from the catalog.
//!
//! [`LiveFeed`]: feed::LiveFeed
//! [`FeedView`]: feed::FeedView

pub mod audit;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod driver;
pub mod feed;
pub mod glossary;
pub mod kpi;
pub mod log;
pub mod synth;
