use serde::{Deserialize, Serialize};

/// One snapshot of verification statistics as served by the dashboard.
///
/// Fields are optional because the server contract is consumed as-is: a
/// response missing a field is still a valid snapshot, and the missing field
/// renders as the literal text `undefined` rather than failing the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub approved: Option<u64>,
    #[serde(default)]
    pub rejected: Option<u64>,
    #[serde(default)]
    pub rejection_rate: Option<f64>,
}

/// The four display slots a snapshot is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsField {
    Total,
    Approved,
    Rejected,
    RejectionRate,
}

impl StatsField {
    /// All fields in render order.
    pub const ALL: [StatsField; 4] = [
        StatsField::Total,
        StatsField::Approved,
        StatsField::Rejected,
        StatsField::RejectionRate,
    ];

    /// Stable identifier of the display slot this field is written to.
    #[allow(dead_code)] // Public API for display implementations
    pub fn slot_id(&self) -> &'static str {
        match self {
            StatsField::Total => "total",
            StatsField::Approved => "approved",
            StatsField::Rejected => "rejected",
            StatsField::RejectionRate => "rejection-rate",
        }
    }
}

impl StatsSnapshot {
    /// Exact text a field renders as. The rate carries a `%` suffix; absent
    /// fields render as `undefined` (and `undefined%` for the rate).
    pub fn field_text(&self, field: StatsField) -> String {
        match field {
            StatsField::Total => fmt_count(self.total),
            StatsField::Approved => fmt_count(self.approved),
            StatsField::Rejected => fmt_count(self.rejected),
            StatsField::RejectionRate => format!("{}%", fmt_rate(self.rejection_rate)),
        }
    }
}

fn fmt_count(value: Option<u64>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "undefined".to_string(),
    }
}

fn fmt_rate(value: Option<f64>) -> String {
    match value {
        Some(r) => r.to_string(),
        None => "undefined".to_string(),
    }
}
