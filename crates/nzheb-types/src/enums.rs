//! Enumeration types for the live event feed.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Qualitative severity of an event, used to colour the event rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Routine, positive signal.
    Good,
    /// Needs attention but not urgent.
    Warn,
    /// Adverse signal (cancellations, predicted non-attendance).
    Danger,
}

impl Severity {
    /// The lowercase tag used in configuration and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warn => "warn",
            Self::Danger => "danger",
        }
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Benefit
// ---------------------------------------------------------------------------

/// Downstream benefit category an event feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Benefit {
    /// Patients and whanau.
    Individuals,
    /// Employers (productivity, avoided appointments).
    Employers,
    /// Government health targets.
    Government,
}

impl Benefit {
    /// Display label shown on benefit chips.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Individuals => "👤 Individuals",
            Self::Employers => "🏢 Employers",
            Self::Government => "🏛 Government",
        }
    }
}

impl core::fmt::Display for Benefit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// A step in an event's path through the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// The producer published the event onto the bus.
    Publish,
    /// The bus delivered the event to one consumer.
    Deliver,
    /// Analytics recomputed the KPIs the event contributes to.
    ComputeKpi,
}

/// Outcome of an audited step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// The step completed.
    #[default]
    Ok,
}
