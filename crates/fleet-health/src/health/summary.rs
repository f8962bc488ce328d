use super::views::{FleetSummary, HealthStatus, VehicleHealth};

impl FleetSummary {
    /// Folds per-vehicle verdicts into bucket counts.
    pub fn from_verdicts<'a, I>(verdicts: I) -> Self
    where
        I: IntoIterator<Item = &'a VehicleHealth>,
    {
        verdicts
            .into_iter()
            .fold(Self::default(), |summary, verdict| summary.with(verdict.status))
    }

    fn with(mut self, status: HealthStatus) -> Self {
        match status {
            HealthStatus::Critical => self.critical += 1,
            HealthStatus::Warning => self.warning += 1,
            HealthStatus::Ok => self.ok += 1,
            HealthStatus::NoData => self.no_data += 1,
        }
        self.total_active += 1;
        self
    }

    /// Vehicles with enough history to be judged.
    pub fn judged(&self) -> usize {
        self.critical + self.warning + self.ok
    }
}
