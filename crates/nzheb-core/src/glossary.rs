//! Hover text for the acronyms and standards the dashboard mentions.

use nzheb_types::EventInstance;

const TIPS: &[(&str, &str)] = &[
    (
        "NZHS",
        "National survey of health status/behaviours; used here for baselines & equity context. (Ministry of Health NZ)",
    ),
    (
        "NZDep",
        "Socioeconomic deprivation quintiles (Q1 least deprived → Q5 most). (University of Otago)",
    ),
    (
        "LINZ",
        "Land Information NZ; official boundary datasets for maps & filters. (data.linz.govt.nz)",
    ),
    (
        "ED ≤6h",
        "NZ health target: 95% of patients processed within 6h. (Ministry of Health NZ)",
    ),
    (
        "31-day cancer",
        "Target from decision to treat → treatment within 31 days. (Ministry of Health NZ)",
    ),
    ("FSA", "First Specialist Assessment, initial specialist outpatient consultation."),
    ("DNA", "Did Not Attend (missed appointment)."),
    (
        "QES earnings",
        "Stats NZ ‘Labour market statistics’ (June 2025): average hourly earnings used for hours→$ conversion. (stats.govt.nz)",
    ),
    (
        "FHIR",
        "Fast Healthcare Interoperability Resources. Open healthcare data standard for clinical data.",
    ),
    (
        "CloudEvents",
        "Open CNCF spec for event metadata so events can be routed consistently.",
    ),
];

/// Hover text for `key`, if the glossary has it.
pub fn tip(key: &str) -> Option<&'static str> {
    TIPS.iter().find(|(k, _)| *k == key).map(|(_, text)| *text)
}

/// Description of an NZDep quintile, `Q1` to `Q5`. Anything else gets the
/// general NZDep text.
pub fn deprivation_tip(quintile: &str) -> Option<&'static str> {
    match quintile {
        "Q1" => Some("Q1 — Least deprived areas (NZDep quintile 1)."),
        "Q2" => Some("Q2 — Lower deprivation than average."),
        "Q3" => Some("Q3 — Middle deprivation (around national median)."),
        "Q4" => Some("Q4 — Higher deprivation than average."),
        "Q5" => Some("Q5 — Most deprived areas (NZDep quintile 5)."),
        _ => tip("NZDep"),
    }
}

/// Hover text for an event row: the cancer target for cancer milestones,
/// FSA for specialist bookings, DNA when the detail mentions it.
pub fn event_tip(event: &EventInstance) -> Option<&'static str> {
    let event_type = event.event_type();
    if event_type.contains("Cancer") {
        tip("31-day cancer")
    } else if event_type.contains("FSA") {
        tip("FSA")
    } else if event.template.detail.contains("DNA") {
        tip("DNA")
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nzheb_types::EventId;

    use super::*;
    use crate::catalog::TemplateCatalog;

    fn instance_of(event_type: &str) -> EventInstance {
        let catalog = TemplateCatalog::builtin();
        let template = catalog.iter().find(|t| t.event_type == event_type).unwrap();
        EventInstance::from_template(template, EventId::new(), "00:00:00".to_owned())
    }

    #[test]
    fn known_and_unknown_keys() {
        assert!(tip("NZHS").is_some());
        assert!(tip("CloudEvents").unwrap().contains("CNCF"));
        assert!(tip("nope").is_none());
    }

    #[test]
    fn quintile_one_is_least_deprived() {
        assert!(deprivation_tip("Q1").unwrap().to_lowercase().contains("least"));
        assert_eq!(deprivation_tip("Q9"), tip("NZDep"));
    }

    #[test]
    fn event_rows_pick_the_right_tip() {
        assert_eq!(event_tip(&instance_of("Cancer31DayMilestone")), tip("31-day cancer"));
        assert_eq!(event_tip(&instance_of("FSABooked")), tip("FSA"));
        assert_eq!(event_tip(&instance_of("AppointmentCancelled")), tip("DNA"));
        assert_eq!(event_tip(&instance_of("LabResultReady")), None);
    }
}
