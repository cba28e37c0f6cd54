//! Terminal rendering of the live event rail.
//!
//! [`TerminalView`] is the engine's [`FeedView`]: on every update it logs
//! the rows that are new since the previous render, oldest of them first,
//! so the terminal reads top-down in time order.

use nzheb_core::feed::FeedView;
use nzheb_core::glossary;
use nzheb_core::kpi;
use nzheb_types::{EventId, EventInstance, Severity};
use tracing::{debug, info};

/// One event as a single line of the rail.
pub fn format_row(event: &EventInstance) -> String {
    let template = &event.template;
    let benefits = template
        .benefits
        .iter()
        .map(|b| b.label())
        .collect::<Vec<_>>()
        .join(", ");
    let mut row = format!(
        "{}  {}  {} → {}",
        event.time,
        template.event_type,
        template.producer,
        template.consumers.join(", ")
    );
    if !benefits.is_empty() {
        row.push_str("  [");
        row.push_str(&benefits);
        row.push(']');
    }
    if !template.detail.is_empty() {
        row.push_str("  ");
        row.push_str(&template.detail);
    }
    row
}

/// Logs new rows of the rail through `tracing`.
#[derive(Debug, Default)]
pub struct TerminalView {
    last_head: Option<EventId>,
    renders: u64,
}

impl TerminalView {
    /// A view that has rendered nothing yet.
    pub const fn new() -> Self {
        Self {
            last_head: None,
            renders: 0,
        }
    }
}

impl FeedView for TerminalView {
    fn render(&mut self, events: &[EventInstance]) {
        self.renders = self.renders.saturating_add(1);

        let fresh: Vec<&EventInstance> = events
            .iter()
            .take_while(|e| Some(e.id) != self.last_head)
            .collect();
        for event in fresh.iter().rev() {
            info!(
                severity = %event.template.severity,
                tip = glossary::event_tip(event).unwrap_or_default(),
                "{}",
                format_row(event)
            );
        }

        self.last_head = events.first().map(|e| e.id);
        debug!(render = self.renders, rows = events.len(), new_rows = fresh.len(), "Event rail rendered");
    }
}

/// Count of events per severity, in `good`, `warn`, `danger` order.
pub fn severity_mix(events: &[EventInstance]) -> [(Severity, u32); 3] {
    let count = |severity: Severity| {
        let n = events.iter().filter(|e| e.template.severity == severity).count();
        u32::try_from(n).unwrap_or(u32::MAX)
    };
    [
        (Severity::Good, count(Severity::Good)),
        (Severity::Warn, count(Severity::Warn)),
        (Severity::Danger, count(Severity::Danger)),
    ]
}

/// Horizontal bar lines for the severity mix, scaled to `width` columns on
/// a rounded-up axis, followed by a marker line at the average count.
pub fn severity_bars(events: &[EventInstance], width: u32) -> Vec<String> {
    let mix = severity_mix(events);
    let counts: Vec<f64> = mix.iter().map(|(_, n)| f64::from(*n)).collect();
    let axis = kpi::domain_max(&counts);
    let drawable = f64::from(width);

    let mut lines: Vec<String> = mix
        .iter()
        .map(|(severity, n)| {
            let length = kpi::bar_height(f64::from(*n), axis, drawable);
            let filled = columns_below(length, width);
            format!("{:<6} {:<width$} {n}", severity.as_str(), "#".repeat(filled), width = drawable_cols(width))
        })
        .collect();

    if let Some(average) = kpi::mean_one_decimal(&counts) {
        // The marker offset is measured from the far end of the axis.
        let column = drawable - kpi::average_marker_offset(average, axis, drawable);
        let pad = columns_below(column, width);
        lines.push(format!("{:<6} {}| {average}", "avg", " ".repeat(pad)));
    }
    lines
}

fn columns_below(length: f64, width: u32) -> usize {
    (0..width).filter(|&i| f64::from(i) + 0.5 < length).count()
}

fn drawable_cols(width: u32) -> usize {
    usize::try_from(width).unwrap_or(usize::MAX)
}
