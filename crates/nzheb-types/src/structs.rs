//! Core entity structs: templates, instances, and audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{AuditAction, AuditStatus, Benefit, Severity};
use crate::ids::EventId;

// ---------------------------------------------------------------------------
// EventTemplate
// ---------------------------------------------------------------------------

/// A static, reusable description of one kind of simulated clinical event.
///
/// Templates are catalog entries: built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    /// Event type name, e.g. `LabResultReady`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Originating producer system.
    pub producer: String,
    /// Human-readable detail line.
    #[serde(default)]
    pub detail: String,
    /// Downstream consumers, in delivery order.
    pub consumers: Vec<String>,
    /// Benefit categories the event feeds.
    #[serde(default)]
    pub benefits: Vec<Benefit>,
    /// Qualitative severity.
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// EventInstance
// ---------------------------------------------------------------------------

/// One concrete, timestamped occurrence generated from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInstance {
    /// Identifier unique within the running process.
    pub id: EventId,
    /// Local wall-clock time of generation, `HH:MM:SS`.
    pub time: String,
    /// The template fields this instance was stamped from.
    #[serde(flatten)]
    pub template: EventTemplate,
}

impl EventInstance {
    /// Stamp a copy of `template` with an identifier and a timestamp.
    pub fn from_template(template: &EventTemplate, id: EventId, time: String) -> Self {
        Self {
            id,
            time,
            template: template.clone(),
        }
    }

    /// Event type name.
    pub fn event_type(&self) -> &str {
        &self.template.event_type
    }

    /// Whether this instance was stamped from `template`.
    pub fn matches(&self, template: &EventTemplate) -> bool {
        self.template == *template
    }
}

// ---------------------------------------------------------------------------
// AuditRecord
// ---------------------------------------------------------------------------

/// One line of the bus audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the step was recorded.
    pub timestamp: DateTime<Utc>,
    /// The event that moved.
    pub event_id: EventId,
    /// Sending side of the step.
    pub producer: String,
    /// Receiving side of the step.
    pub consumer: String,
    /// What happened.
    pub action: AuditAction,
    /// How it went. Lines written without a status read back as `ok`.
    #[serde(default)]
    pub status: AuditStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lab_result() -> EventTemplate {
        EventTemplate {
            event_type: "LabResultReady".to_owned(),
            producer: "LIS".to_owned(),
            detail: "HbA1c ready".to_owned(),
            consumers: vec!["GP PMS".to_owned(), "Targets".to_owned()],
            benefits: vec![Benefit::Individuals],
            severity: Severity::Good,
        }
    }

    #[test]
    fn instance_flattens_template_fields() {
        let instance = EventInstance::from_template(&lab_result(), EventId::new(), "09:05:01".to_owned());
        let value = serde_json::to_value(&instance).unwrap();
        assert_eq!(value["type"], "LabResultReady");
        assert_eq!(value["producer"], "LIS");
        assert_eq!(value["time"], "09:05:01");
        assert_eq!(value["severity"], "good");
        assert_eq!(value["benefits"][0], "individuals");
    }

    #[test]
    fn template_parses_with_defaults() {
        let json = r#"{"type":"X","producer":"P","consumers":["C"],"severity":"good"}"#;
        let template: EventTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.event_type, "X");
        assert!(template.detail.is_empty());
        assert!(template.benefits.is_empty());
    }

    #[test]
    fn matches_compares_template_content() {
        let template = lab_result();
        let instance = EventInstance::from_template(&template, EventId::new(), "00:00:00".to_owned());
        assert!(instance.matches(&template));

        let mut other = template;
        other.detail = "Lipids ready".to_owned();
        assert!(!instance.matches(&other));
    }
}
