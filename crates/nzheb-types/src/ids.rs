//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Event instances are never persisted or compared across runs, so the only
//! requirement on an identifier is practical non-collision within a single
//! process. UUID v7 gives that, and sorts in generation order as a bonus.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a synthesized event instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EventId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<EventId> for Uuid {
    fn from(id: EventId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn new_ids_are_not_nil() {
        assert_ne!(EventId::new().into_inner(), Uuid::nil());
    }

    #[test]
    fn ids_do_not_collide_in_a_burst() {
        let ids: BTreeSet<EventId> = (0..10_000).map(|_| EventId::new()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn serializes_as_bare_uuid() {
        let id = EventId::new();
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json, Some(format!("\"{}\"", id.0)));
    }
}
