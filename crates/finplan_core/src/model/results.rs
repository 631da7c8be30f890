//! The output shape `runSimulation` produces (spec.md §6): a dense,
//! per-date series with each envelope's contribution broken out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatePoint {
    pub date: f64,
    pub value: f64,
    pub parts: Vec<(String, f64)>,
}

/// The full result of a run: one `DatePoint` per grid index, aligned with
/// the time grid that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimulationResult {
    pub points: Vec<DatePoint>,
}

impl SimulationResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_no_points() {
        assert!(SimulationResult::empty().is_empty());
    }
}
