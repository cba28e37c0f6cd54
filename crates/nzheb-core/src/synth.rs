//! Event synthesis: one random template, stamped with an id and a time.

use nzheb_types::{EventId, EventInstance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::TemplateCatalog;
use crate::clock::{LocalWallClock, WallClock};

/// Produces event instances from a template catalog.
///
/// Selection is uniform over the catalog. The random source and the wall
/// clock are type parameters so tests can pin both.
#[derive(Debug, Clone)]
pub struct EventSynthesizer<R = StdRng, C = LocalWallClock> {
    catalog: TemplateCatalog,
    rng: R,
    clock: C,
}

impl EventSynthesizer {
    /// Synthesizer seeded from OS entropy, stamping local time.
    pub fn from_entropy(catalog: TemplateCatalog) -> Self {
        Self::with_parts(catalog, StdRng::from_os_rng(), LocalWallClock)
    }

    /// Synthesizer with reproducible template selection.
    pub fn seeded(catalog: TemplateCatalog, seed: u64) -> Self {
        Self::with_parts(catalog, StdRng::seed_from_u64(seed), LocalWallClock)
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_seed_option(catalog: TemplateCatalog, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(catalog, seed),
            None => Self::from_entropy(catalog),
        }
    }
}

impl<R: Rng, C: WallClock> EventSynthesizer<R, C> {
    /// Assemble a synthesizer from explicit parts.
    pub const fn with_parts(catalog: TemplateCatalog, rng: R, clock: C) -> Self {
        Self { catalog, rng, clock }
    }

    /// The catalog templates are drawn from.
    pub const fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Produce one event from a uniformly chosen template.
    pub fn synthesize(&mut self) -> EventInstance {
        let index = self.rng.random_range(0..self.catalog.len());
        let template = self.catalog.get_wrapping(index);
        EventInstance::from_template(template, EventId::new(), self.clock.timestamp())
    }

    /// The initial log contents: `count` events cycling through the catalog
    /// in order, returned newest-first.
    pub fn seed_events(&self, count: usize) -> Vec<EventInstance> {
        let time = self.clock.timestamp();
        let mut events: Vec<EventInstance> = (0..count)
            .map(|i| {
                EventInstance::from_template(self.catalog.get_wrapping(i), EventId::new(), time.clone())
            })
            .collect();
        events.reverse();
        events
    }
}
