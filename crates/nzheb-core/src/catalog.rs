//! The event template catalog.
//!
//! A [`TemplateCatalog`] is never empty: the first template is held apart
//! from the rest, so lookups need no fallible indexing once the catalog is
//! built. Malformed templates are rejected at construction, which keeps
//! every failure at startup instead of inside the periodic callback.

use nzheb_types::{Benefit, EventTemplate, Severity};

/// Errors raised while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No templates were supplied.
    #[error("event catalog is empty: at least one template is required")]
    Empty,

    /// A template has an empty or whitespace-only event type.
    #[error("template #{index} has a blank event type")]
    BlankEventType {
        /// Position of the template in the supplied list.
        index: usize,
    },

    /// A template has an empty or whitespace-only producer.
    #[error("template {event_type} has a blank producer")]
    BlankProducer {
        /// The offending template's event type.
        event_type: String,
    },

    /// A template routes to nobody.
    #[error("template {event_type} has no consumers")]
    NoConsumers {
        /// The offending template's event type.
        event_type: String,
    },
}

/// A fixed, non-empty, read-only list of event templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    first: EventTemplate,
    rest: Vec<EventTemplate>,
}

impl TemplateCatalog {
    /// Build a catalog from a list of templates, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] for an empty list, or the first
    /// per-template validation failure.
    pub fn new(templates: Vec<EventTemplate>) -> Result<Self, CatalogError> {
        for (index, template) in templates.iter().enumerate() {
            validate(index, template)?;
        }
        let mut iter = templates.into_iter();
        let first = iter.next().ok_or(CatalogError::Empty)?;
        Ok(Self {
            first,
            rest: iter.collect(),
        })
    }

    /// The eight demo templates shown on the live dashboard.
    pub fn builtin() -> Self {
        let first = template(
            "LabResultReady",
            "LIS",
            "HbA1c ready",
            &["GP PMS", "Oncology", "Targets"],
            &[Benefit::Individuals, Benefit::Government],
            Severity::Good,
        );
        let rest = vec![
            template(
                "EDStatusChanged",
                "ED",
                "Triage 3 → Seen",
                &["Ops Dash", "Targets"],
                &[Benefit::Government],
                Severity::Warn,
            ),
            template(
                "ImmunisationUpdated",
                "AIR",
                "24m schedule",
                &["Targets", "Productivity"],
                &[Benefit::Individuals, Benefit::Government],
                Severity::Good,
            ),
            template(
                "ReferralRegistered",
                "GP PMS",
                "Specialty: Cardiology",
                &["Targets"],
                &[Benefit::Individuals],
                Severity::Good,
            ),
            template(
                "AppointmentCancelled",
                "Hospital PAS",
                "DNA risk ↑",
                &["Productivity", "Ops Dash"],
                &[Benefit::Employers, Benefit::Government],
                Severity::Danger,
            ),
            template(
                "FSABooked",
                "Hospital PAS",
                "First Specialist Assessment scheduled",
                &["Targets", "Ops Dash"],
                &[Benefit::Individuals, Benefit::Government],
                Severity::Good,
            ),
            template(
                "Cancer31DayMilestone",
                "Oncology",
                "Decision→Treatment: Day 21",
                &["Targets", "Ops Dash"],
                &[Benefit::Individuals, Benefit::Government],
                Severity::Warn,
            ),
            template(
                "DNAPredicted",
                "Hospital PAS",
                "DNA risk ↑ (model)",
                &["Productivity", "Ops Dash"],
                &[Benefit::Employers, Benefit::Government],
                Severity::Danger,
            ),
        ];
        Self { first, rest }
    }

    /// Number of templates. Always at least 1.
    pub fn len(&self) -> usize {
        self.rest.len().saturating_add(1)
    }

    /// Always `false`; present for API symmetry with collections.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Template at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&EventTemplate> {
        match index.checked_sub(1) {
            None => Some(&self.first),
            Some(rest_index) => self.rest.get(rest_index),
        }
    }

    /// Template at `index % len`. Never fails.
    pub fn get_wrapping(&self, index: usize) -> &EventTemplate {
        let wrapped = index.checked_rem(self.len()).unwrap_or(0);
        self.get(wrapped).unwrap_or(&self.first)
    }

    /// Iterate templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &EventTemplate> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Whether `template` is one of this catalog's entries.
    pub fn contains(&self, template: &EventTemplate) -> bool {
        self.iter().any(|t| t == template)
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(index: usize, template: &EventTemplate) -> Result<(), CatalogError> {
    if template.event_type.trim().is_empty() {
        return Err(CatalogError::BlankEventType { index });
    }
    if template.producer.trim().is_empty() {
        return Err(CatalogError::BlankProducer {
            event_type: template.event_type.clone(),
        });
    }
    if template.consumers.is_empty() {
        return Err(CatalogError::NoConsumers {
            event_type: template.event_type.clone(),
        });
    }
    Ok(())
}

fn template(
    event_type: &str,
    producer: &str,
    detail: &str,
    consumers: &[&str],
    benefits: &[Benefit],
    severity: Severity,
) -> EventTemplate {
    EventTemplate {
        event_type: event_type.to_owned(),
        producer: producer.to_owned(),
        detail: detail.to_owned(),
        consumers: consumers.iter().map(|c| (*c).to_owned()).collect(),
        benefits: benefits.to_vec(),
        severity,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn minimal(event_type: &str) -> EventTemplate {
        EventTemplate {
            event_type: event_type.to_owned(),
            producer: "P".to_owned(),
            detail: String::new(),
            consumers: vec!["C".to_owned()],
            benefits: Vec::new(),
            severity: Severity::Good,
        }
    }

    #[test]
    fn builtin_has_eight_valid_templates() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        for (index, template) in catalog.iter().enumerate() {
            assert!(validate(index, template).is_ok());
        }
        assert_eq!(catalog.get(0).unwrap().event_type, "LabResultReady");
        assert_eq!(catalog.get(7).unwrap().event_type, "DNAPredicted");
        assert!(catalog.get(8).is_none());
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(TemplateCatalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let result = TemplateCatalog::new(vec![minimal("A"), minimal("  ")]);
        assert!(matches!(result, Err(CatalogError::BlankEventType { index: 1 })));

        let mut no_producer = minimal("B");
        no_producer.producer = String::new();
        let result = TemplateCatalog::new(vec![no_producer]);
        assert!(matches!(result, Err(CatalogError::BlankProducer { .. })));

        let mut no_consumers = minimal("C");
        no_consumers.consumers.clear();
        let result = TemplateCatalog::new(vec![no_consumers]);
        assert!(matches!(result, Err(CatalogError::NoConsumers { .. })));
    }

    #[test]
    fn get_wrapping_cycles() {
        let catalog = TemplateCatalog::new(vec![minimal("A"), minimal("B"), minimal("C")]).unwrap();
        let types: Vec<&str> = (0..7)
            .map(|i| catalog.get_wrapping(i).event_type.as_str())
            .collect();
        assert_eq!(types, ["A", "B", "C", "A", "B", "C", "A"]);
    }

    #[test]
    fn single_template_catalog() {
        let catalog = TemplateCatalog::new(vec![minimal("X")]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get_wrapping(41).event_type, "X");
        assert!(catalog.contains(&minimal("X")));
        assert!(!catalog.contains(&minimal("Y")));
    }
}
