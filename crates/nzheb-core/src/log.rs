//! The bounded, newest-first event log rendered by the event rail.
//!
//! Insertion is always at the head and eviction always from the tail, so
//! insertion order is the only order. The capacity is small (40 by default),
//! which makes a front-inserting `Vec` the simplest structure that also
//! hands the view a contiguous slice.

use nzheb_types::EventInstance;

/// Capacity used by the live dashboard.
pub const DEFAULT_LOG_CAPACITY: usize = 40;

/// Errors raised when building a log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// A log that can hold nothing cannot show anything.
    #[error("event log capacity must be at least 1")]
    ZeroCapacity,
}

/// A fixed-capacity, newest-first sequence of event instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedEventLog {
    events: Vec<EventInstance>,
    capacity: usize,
    evicted: u64,
}

impl BoundedEventLog {
    /// Create an empty log holding at most `capacity` events.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, LogError> {
        if capacity == 0 {
            return Err(LogError::ZeroCapacity);
        }
        Ok(Self {
            events: Vec::with_capacity(capacity.saturating_add(1)),
            capacity,
            evicted: 0,
        })
    }

    /// Create an empty log with [`DEFAULT_LOG_CAPACITY`].
    pub fn with_default_capacity() -> Self {
        Self {
            events: Vec::with_capacity(DEFAULT_LOG_CAPACITY.saturating_add(1)),
            capacity: DEFAULT_LOG_CAPACITY,
            evicted: 0,
        }
    }

    /// Insert `event` at the head. Returns the tail event it pushed out,
    /// if the log was full.
    pub fn append(&mut self, event: EventInstance) -> Option<EventInstance> {
        self.events.insert(0, event);
        if self.events.len() > self.capacity {
            self.evicted = self.evicted.saturating_add(1);
            return self.events.pop();
        }
        None
    }

    /// Replace the contents with a batch that is already newest-first,
    /// keeping only the first `capacity` entries.
    pub fn seed(&mut self, newest_first: Vec<EventInstance>) {
        self.events = newest_first;
        let overflow = self.events.len().saturating_sub(self.capacity);
        self.events.truncate(self.capacity);
        self.evicted = self
            .evicted
            .saturating_add(u64::try_from(overflow).unwrap_or(u64::MAX));
    }

    /// Read-only view of the contents, newest first.
    pub fn as_slice(&self) -> &[EventInstance] {
        &self.events
    }

    /// Owned copy of the contents, newest first.
    pub fn snapshot(&self) -> Vec<EventInstance> {
        self.events.clone()
    }

    /// The most recently appended event.
    pub fn newest(&self) -> Option<&EventInstance> {
        self.events.first()
    }

    /// Number of events currently held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Maximum number of events held.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events dropped from the tail since the log was created.
    pub const fn evicted_total(&self) -> u64 {
        self.evicted
    }
}

impl Default for BoundedEventLog {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
