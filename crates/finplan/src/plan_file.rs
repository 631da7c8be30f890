//! On-disk plan format: a single YAML (or JSON) file holding a
//! [`finplan_core::model::Plan`] plus the [`finplan_core::model::Schema`]
//! it was authored against. Mirrors the storage layer's own
//! read-whole-file/parse/write-atomically shape, reduced to the single
//! file a CLI invocation needs instead of a per-scenario directory tree.

use std::fs;
use std::path::Path;

use finplan_core::model::{Plan, Schema};
use serde::{Deserialize, Serialize};

use crate::util::io::atomic_write;

#[derive(Debug)]
pub enum PlanFileError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for PlanFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanFileError::Io(msg) => write!(f, "IO error: {msg}"),
            PlanFileError::Parse(msg) => write!(f, "parse error: {msg}"),
            PlanFileError::Serialize(msg) => write!(f, "serialize error: {msg}"),
        }
    }
}

impl std::error::Error for PlanFileError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    pub plan: Plan,
    pub schema: Schema,
}

impl PlanFile {
    /// Load a plan file, dispatching on extension: `.json` is parsed with
    /// `serde_json`, anything else (including no extension) is treated as
    /// YAML via `serde_saphyr`.
    pub fn load(path: &Path) -> Result<Self, PlanFileError> {
        let content = fs::read_to_string(path).map_err(|e| PlanFileError::Io(e.to_string()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| PlanFileError::Parse(e.to_string()))
        } else {
            serde_saphyr::from_str(&content).map_err(|e| PlanFileError::Parse(e.to_string()))
        }
    }

    /// Write a plan file back out, atomically, in the same format its
    /// extension implies.
    pub fn save(&self, path: &Path) -> Result<(), PlanFileError> {
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self).map_err(|e| PlanFileError::Serialize(e.to_string()))?
        } else {
            serde_saphyr::to_string(self).map_err(|e| PlanFileError::Serialize(e.to_string()))?
        };
        atomic_write(path, &content).map_err(|e| PlanFileError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finplan_core::growth::GrowthModel;
    use finplan_core::model::{EnvelopeSpec, FilingStatus};
    use jiff::civil::date;
    use tempfile::tempdir;

    fn sample() -> PlanFile {
        PlanFile {
            plan: Plan {
                birth_date: date(1990, 1, 1),
                adjust_for_inflation: false,
                inflation_rate: 0.03,
                filing_status: FilingStatus::Single,
                dependents: Default::default(),
                location: "US".into(),
                envelopes: vec![EnvelopeSpec {
                    name: "Cash".into(),
                    category: "bank".into(),
                    growth: GrowthModel::None,
                }],
                events: Vec::new(),
            },
            schema: Schema {
                categories: vec!["bank".into()],
                inflation_rate: 0.03,
            },
        }
    }

    #[test]
    fn round_trips_through_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.yaml");
        let file = sample();
        file.save(&path).unwrap();
        let loaded = PlanFile::load(&path).unwrap();
        assert_eq!(loaded.plan.envelopes.len(), 1);
        assert_eq!(loaded.plan.envelopes[0].name, "Cash");
    }

    #[test]
    fn round_trips_through_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let file = sample();
        file.save(&path).unwrap();
        let loaded = PlanFile::load(&path).unwrap();
        assert_eq!(loaded.plan.filing_status, FilingStatus::Single);
    }
}
