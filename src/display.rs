use crate::stats::StatsField;
use chrono::Local;
use std::io::{self, Write};
use tracing::warn;

/// Render target for the four statistics slots.
///
/// Mirrors the display contract of the dashboard page: one text slot per
/// field, written independently and in sequence. `refresh` is called once
/// after the four writes of a successful cycle; a failed cycle performs no
/// writes and no refresh, so the previously rendered values stay visible.
pub trait StatsDisplay {
    fn set_text(&mut self, field: StatsField, value: &str);
    fn refresh(&mut self);
}

/// Terminal display that renders the stats as a single line per poll
pub struct ConsoleDisplay<W: Write> {
    out: W,
    slots: [Option<String>; 4],
}

impl ConsoleDisplay<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ConsoleDisplay<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            slots: [None, None, None, None],
        }
    }

    fn slot_index(field: StatsField) -> usize {
        match field {
            StatsField::Total => 0,
            StatsField::Approved => 1,
            StatsField::Rejected => 2,
            StatsField::RejectionRate => 3,
        }
    }
}

impl<W: Write> StatsDisplay for ConsoleDisplay<W> {
    fn set_text(&mut self, field: StatsField, value: &str) {
        self.slots[Self::slot_index(field)] = Some(value.to_string());
    }

    fn refresh(&mut self) {
        let text = |field: StatsField| -> &str {
            self.slots[Self::slot_index(field)]
                .as_deref()
                .unwrap_or("-")
        };

        let line = format!(
            "[{}] total={} approved={} rejected={} rejection-rate={}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            text(StatsField::Total),
            text(StatsField::Approved),
            text(StatsField::Rejected),
            text(StatsField::RejectionRate),
        );

        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            warn!("Failed to write stats line to display: {}", e);
        }
    }
}
